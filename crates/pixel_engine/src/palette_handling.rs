use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::rc::Rc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{EngineError, EngineResult};

lazy_static::lazy_static! {
    static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap();

    static ref COMPONENT_REGEX: Regex = Regex::new(r"\d+").unwrap();
}

/// A 24-bit RGB color. Equality is component-wise, so two colors compare
/// equal iff their canonical hex forms are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{Color: r={:02X}, g={:02X}, b={:02X}}}", self.r, self.g, self.b)
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);
    pub const YELLOW: Color = Color::new(0xFF, 0xFF, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn get_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Canonical form: `#` followed by 6 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses a 6-digit hex color, case insensitive, `#` prefix optional.
    pub fn from_hex(hex: &str) -> EngineResult<Self> {
        if let Some(cap) = HEX_COLOR_REGEX.captures(hex) {
            let (_, [r, g, b]) = cap.extract();
            let r = u8::from_str_radix(r, 16)?;
            let g = u8::from_str_radix(g, 16)?;
            let b = u8::from_str_radix(b, 16)?;
            Ok(Color::new(r, g, b))
        } else {
            Err(EngineError::generic(format!("Invalid hex color: {hex}")))
        }
    }

    /// Best-effort color reading, used for user input and for values read
    /// back from the display layer. Hex notation is parsed case
    /// insensitively; any other input is scanned for up to three decimal
    /// components (missing components default to 0, oversized ones clamp
    /// to 255). Never fails; unusable input is black.
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Color::BLACK;
        }
        if input.starts_with('#') {
            return Color::from_hex(input).unwrap_or(Color::BLACK);
        }
        let mut components = [0u8; 3];
        for (slot, m) in components.iter_mut().zip(COMPONENT_REGEX.find_iter(input).take(3)) {
            *slot = m.as_str().parse::<u64>().map_or(255, |v| v.min(255)) as u8;
        }
        Color::new(components[0], components[1], components[2])
    }
}

// persisted as the canonical hex string
impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Color::from_input(&value))
    }
}

/// An ordered color sequence. A color already present is never re-added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn from_slice(colors: &[Color]) -> Self {
        Self { colors: colors.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    pub fn color_iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// Appends `color` unless it is already present. Returns whether the
    /// palette changed.
    pub fn add_color(&mut self, color: Color) -> bool {
        if self.contains(color) {
            return false;
        }
        self.colors.push(color);
        true
    }

    /// Removes the first entry equal to `color`. Returns whether an entry
    /// was removed.
    pub fn remove_color(&mut self, color: Color) -> bool {
        if let Some(pos) = self.colors.iter().position(|c| *c == color) {
            self.colors.remove(pos);
            true
        } else {
            false
        }
    }
}

pub const DEFAULT_PALETTE_NAME: &str = "default";

pub const DEFAULT_PALETTE_COLORS: [Color; 6] = [Color::BLACK, Color::WHITE, Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW];

/// Opaque reference to a color's visual element, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwatchHandle(pub usize);

/// Single-slot staging area for a color deletion awaiting confirmation.
#[derive(Debug, Clone, Copy)]
pub struct PendingDelete {
    pub color: Color,
    pub handle: SwatchHandle,
}

/// Persistence boundary for the palette map. The serialized form is a
/// JSON object mapping palette name to a list of canonical hex colors.
pub trait PaletteStorage {
    /// Returns the stored serialized palette map, or `None` if nothing
    /// was stored yet.
    fn load(&self) -> EngineResult<Option<String>>;
    fn save(&mut self, data: &str) -> EngineResult<()>;
}

/// File-backed palette storage.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PaletteStorage for FileStorage {
    fn load(&self) -> EngineResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, data: &str) -> EngineResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory palette storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn stored(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

impl PaletteStorage for MemoryStorage {
    fn load(&self) -> EngineResult<Option<String>> {
        Ok(self.data.borrow().clone())
    }

    fn save(&mut self, data: &str) -> EngineResult<()> {
        *self.data.borrow_mut() = Some(data.to_string());
        Ok(())
    }
}

fn default_palettes() -> BTreeMap<String, Palette> {
    let mut palettes = BTreeMap::new();
    palettes.insert(DEFAULT_PALETTE_NAME.to_string(), Palette::from_slice(&DEFAULT_PALETTE_COLORS));
    palettes
}

/// Named palette collection with exactly one palette current at any time.
/// Every mutation is written back through the storage it was loaded from.
pub struct PaletteStore {
    palettes: BTreeMap<String, Palette>,
    current: String,
    pending_delete: Option<PendingDelete>,
    storage: Box<dyn PaletteStorage>,
}

impl PaletteStore {
    /// Loads the palette map from `storage`. Missing or unreadable state
    /// falls back to one default palette with 6 colors.
    pub fn load(storage: Box<dyn PaletteStorage>) -> Self {
        let palettes = match storage.load() {
            Ok(Some(data)) => match serde_json::from_str::<BTreeMap<String, Palette>>(&data) {
                Ok(map) if !map.is_empty() => map,
                Ok(_) => default_palettes(),
                Err(err) => {
                    log::warn!("stored palettes are unreadable, using defaults: {err}");
                    default_palettes()
                }
            },
            Ok(None) => default_palettes(),
            Err(err) => {
                log::warn!("palette storage failed to load, using defaults: {err}");
                default_palettes()
            }
        };
        // load() never yields an empty map, so a current palette exists
        let current = if palettes.contains_key(DEFAULT_PALETTE_NAME) {
            DEFAULT_PALETTE_NAME.to_string()
        } else {
            palettes.keys().next().cloned().unwrap_or_default()
        };
        Self {
            palettes,
            current,
            pending_delete: None,
            storage,
        }
    }

    fn persist(&mut self) -> EngineResult<()> {
        let data = serde_json::to_string(&self.palettes)?;
        self.storage.save(&data)
    }

    pub fn palette_names(&self) -> impl Iterator<Item = &String> {
        self.palettes.keys()
    }

    pub fn current_name(&self) -> &str {
        &self.current
    }

    pub fn current_palette(&self) -> Option<&Palette> {
        self.palettes.get(&self.current)
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Appends `color` to the current palette unless already present.
    /// Returns whether the palette changed.
    pub fn add_color(&mut self, color: Color) -> EngineResult<bool> {
        let Some(palette) = self.palettes.get_mut(&self.current) else {
            return Ok(false);
        };
        if !palette.add_color(color) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Stages a deletion awaiting confirmation. A new request overwrites
    /// any prior unconfirmed one.
    pub fn request_delete(&mut self, color: Color, handle: SwatchHandle) {
        if self.pending_delete.is_some() {
            log::debug!("overwriting pending deletion of {color}");
        }
        self.pending_delete = Some(PendingDelete { color, handle });
    }

    /// Resolves the pending deletion. On accept the first matching entry
    /// is removed from the current palette and the staged handle is
    /// returned so the caller can detach its visual element. The pending
    /// slot is cleared regardless of the outcome.
    pub fn confirm_delete(&mut self, accept: bool) -> EngineResult<Option<SwatchHandle>> {
        let Some(pending) = self.pending_delete.take() else {
            return Ok(None);
        };
        if !accept {
            return Ok(None);
        }
        let Some(palette) = self.palettes.get_mut(&self.current) else {
            return Ok(None);
        };
        if !palette.remove_color(pending.color) {
            return Ok(None);
        }
        self.persist()?;
        Ok(Some(pending.handle))
    }

    /// Creates an empty palette and makes it current. Empty or colliding
    /// names are a silent no-op; returns whether a palette was created.
    pub fn create_palette(&mut self, name: &str) -> EngineResult<bool> {
        if name.is_empty() || self.palettes.contains_key(name) {
            log::debug!("ignoring palette creation for {name:?}");
            return Ok(false);
        }
        self.palettes.insert(name.to_string(), Palette::default());
        self.current = name.to_string();
        self.persist()?;
        Ok(true)
    }

    pub fn select_palette(&mut self, name: &str) -> EngineResult<()> {
        if !self.palettes.contains_key(name) {
            return Err(EngineError::UnknownPalette { name: name.to_string() });
        }
        self.current = name.to_string();
        Ok(())
    }
}
