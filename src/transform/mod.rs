//! # Coordinate Transforms
//!
//! Every raw coordinate goes through a [`CoordinateTransform`] as soon as it
//! is lexed, before any relative-offset arithmetic. Relative deltas are
//! therefore accumulated in already-transformed space, which is only sound
//! because every transform here is linear.

use crate::error::ConfigError;

/// Per-axis coordinate mapping applied to every consumed coordinate.
pub trait CoordinateTransform {
    fn transform_x(&self, x: f64) -> f64;
    fn transform_y(&self, y: f64) -> f64;
}

/// Leaves coordinates untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl CoordinateTransform for Identity {
    fn transform_x(&self, x: f64) -> f64 {
        x
    }

    fn transform_y(&self, y: f64) -> f64 {
        y
    }
}

/// Independent linear rescale of each axis from a source canvas size into a
/// destination canvas size. Aspect ratio is not preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    source_width: f64,
    source_height: f64,
    dest_width: f64,
    dest_height: f64,
}

impl Rescale {
    pub fn new(
        source_width: f64,
        source_height: f64,
        dest_width: f64,
        dest_height: f64,
    ) -> Result<Self, ConfigError> {
        check_dimension("source width", source_width)?;
        check_dimension("source height", source_height)?;
        check_dimension("destination width", dest_width)?;
        check_dimension("destination height", dest_height)?;
        Ok(Rescale {
            source_width,
            source_height,
            dest_width,
            dest_height,
        })
    }

    /// Build from two `(width, height)` sizes.
    pub fn between(source: (f64, f64), dest: (f64, f64)) -> Result<Self, ConfigError> {
        Rescale::new(source.0, source.1, dest.0, dest.1)
    }

    pub fn scale_x(&self) -> f64 {
        self.dest_width / self.source_width
    }

    pub fn scale_y(&self) -> f64 {
        self.dest_height / self.source_height
    }
}

fn check_dimension(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}

impl CoordinateTransform for Rescale {
    fn transform_x(&self, x: f64) -> f64 {
        x * self.dest_width / self.source_width
    }

    fn transform_y(&self, y: f64) -> f64 {
        y * self.dest_height / self.source_height
    }
}

impl<T: CoordinateTransform + ?Sized> CoordinateTransform for &T {
    fn transform_x(&self, x: f64) -> f64 {
        (**self).transform_x(x)
    }

    fn transform_y(&self, y: f64) -> f64 {
        (**self).transform_y(y)
    }
}

impl<T: CoordinateTransform + ?Sized> CoordinateTransform for Box<T> {
    fn transform_x(&self, x: f64) -> f64 {
        (**self).transform_x(x)
    }

    fn transform_y(&self, y: f64) -> f64 {
        (**self).transform_y(y)
    }
}

/// A transform built from a pair of closures, for one-off mappings such as
/// a y-flip. Callers are responsible for keeping them linear if they mix
/// relative commands in.
pub struct FnTransform<FX, FY> {
    fx: FX,
    fy: FY,
}

impl<FX, FY> FnTransform<FX, FY>
where
    FX: Fn(f64) -> f64,
    FY: Fn(f64) -> f64,
{
    pub fn new(fx: FX, fy: FY) -> Self {
        FnTransform { fx, fy }
    }
}

impl<FX, FY> CoordinateTransform for FnTransform<FX, FY>
where
    FX: Fn(f64) -> f64,
    FY: Fn(f64) -> f64,
{
    fn transform_x(&self, x: f64) -> f64 {
        (self.fx)(x)
    }

    fn transform_y(&self, y: f64) -> f64 {
        (self.fy)(y)
    }
}

/// Parse a `WIDTHxHEIGHT` size such as `24x24` or `1920X1080`.
pub fn parse_size(s: &str) -> Result<(f64, f64), ConfigError> {
    let invalid = || ConfigError::InvalidSize(s.to_string());
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let w = w.trim().parse::<f64>().map_err(|_| invalid())?;
    let h = h.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((w, h))
}
