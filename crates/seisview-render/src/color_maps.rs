//! Color map system.

use std::collections::HashMap;

use glam::Vec3;

/// A color map for mapping amplitudes to colors.
#[derive(Debug, Clone)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples (evenly spaced from 0 to 1).
    pub colors: Vec<Vec3>,
    /// Whether the map is centered on a neutral middle color.
    pub diverging: bool,
}

impl ColorMap {
    /// Creates a new sequential color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
            diverging: false,
        }
    }

    /// Creates a new diverging color map.
    pub fn diverging(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            diverging: true,
            ..Self::new(name, colors)
        }
    }

    /// Samples the color map at a given value (0 to 1).
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);

        if self.colors.is_empty() {
            return Vec3::ZERO;
        }

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let n = self.colors.len() - 1;
        let idx = (t * n as f32).floor() as usize;
        let idx = idx.min(n - 1);
        let frac = t * n as f32 - idx as f32;

        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }

    /// Evenly spaced `(position, "rgb(r,g,b)")` stops, as web plotting
    /// libraries expect them.
    pub fn stops(&self) -> Vec<(f32, String)> {
        let n = self.colors.len().saturating_sub(1).max(1) as f32;
        (0..self.colors.len())
            .map(|i| {
                let t = i as f32 / n;
                let rgb = (self.sample(t) * 255.0).round();
                (
                    t,
                    format!("rgb({},{},{})", rgb.x as u8, rgb.y as u8, rgb.z as u8),
                )
            })
            .collect()
    }
}

/// Registry for managing color maps.
///
/// The default maps are always present; registering can replace them but
/// never removes one.
pub struct ColorMapRegistry {
    color_maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a new color map registry with default color maps.
    pub fn new() -> Self {
        let mut registry = Self {
            color_maps: HashMap::new(),
        };
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        // Seismic: dark blue through white to dark red
        self.register(ColorMap::diverging(
            "seismic",
            vec![
                Vec3::new(0.0, 0.0, 0.3),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.5, 0.0, 0.0),
            ],
        ));

        // Red-blue, reversed so negative amplitudes are red
        self.register(ColorMap::diverging(
            "rdbu",
            vec![
                Vec3::new(0.404, 0.000, 0.122),
                Vec3::new(0.698, 0.094, 0.169),
                Vec3::new(0.839, 0.376, 0.302),
                Vec3::new(0.957, 0.647, 0.510),
                Vec3::new(0.992, 0.859, 0.780),
                Vec3::new(0.969, 0.969, 0.969),
                Vec3::new(0.820, 0.898, 0.941),
                Vec3::new(0.573, 0.773, 0.871),
                Vec3::new(0.263, 0.576, 0.765),
                Vec3::new(0.129, 0.400, 0.675),
                Vec3::new(0.020, 0.188, 0.380),
            ],
        ));

        // Coolwarm color map
        self.register(ColorMap::diverging(
            "coolwarm",
            vec![
                Vec3::new(0.230, 0.299, 0.754),
                Vec3::new(0.552, 0.690, 0.996),
                Vec3::new(0.866, 0.866, 0.866),
                Vec3::new(0.956, 0.604, 0.486),
                Vec3::new(0.706, 0.016, 0.150),
            ],
        ));

        // Greys, for variable-density displays
        self.register(ColorMap::new(
            "greys",
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)],
        ));
    }

    /// Registers a color map.
    pub fn register(&mut self, color_map: ColorMap) {
        self.color_maps.insert(color_map.name.clone(), color_map);
    }

    /// Gets a color map by name.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Gets a color map by name, falling back to `seismic`.
    pub fn get_or_default(&self, name: &str) -> &ColorMap {
        match self.get(name) {
            Some(map) => map,
            None => {
                let mut known: Vec<&str> = self.names().collect();
                known.sort_unstable();
                log::warn!(
                    "unknown color map '{name}', using 'seismic' (known: {})",
                    known.join(", ")
                );
                &self.color_maps["seismic"]
            }
        }
    }

    /// Returns all color map names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.color_maps.keys().map(|s| s.as_str())
    }
}

impl Default for ColorMapRegistry {
    fn default() -> Self {
        Self::new()
    }
}
