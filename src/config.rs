//! Chain configuration: how many modules there are and how they are mounted.

use core::convert::TryFrom;
use core::fmt;

use crate::command::consts::INTENSITY_MAX;

/// The longest chain the driver will allocate a scroll buffer for.
pub const MAX_MODULES: usize = 16;

/// Rotation applied to each 8x8 module before it is written, to compensate for how the matrix
/// is soldered onto the module. Many 4-in-1 modules need `Clockwise` or `CounterClockwise`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    None,
    Clockwise,
    CounterClockwise,
    OneEighty,
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::None
    }
}

impl TryFrom<u8> for Rotation {
    type Error = ConfigError;

    /// Decode the numeric rotation codes used by block-based editors: 0 none, 1 clockwise,
    /// 2 counter-clockwise, 3 180 degrees.
    fn try_from(code: u8) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Rotation::None),
            1 => Ok(Rotation::Clockwise),
            2 => Ok(Rotation::CounterClockwise),
            3 => Ok(Rotation::OneEighty),
            _ => Err(ConfigError::InvalidRotation(code)),
        }
    }
}

/// A rejected configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NoModules,
    TooManyModules(usize),
    InvalidRotation(u8),
    InvalidIntensity(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::NoModules => write!(f, "chain must contain at least one module"),
            ConfigError::TooManyModules(n) => write!(
                f,
                "chain of {} modules exceeds the supported maximum of {}",
                n, MAX_MODULES
            ),
            ConfigError::InvalidRotation(code) => {
                write!(f, "rotation code {} is not one of 0, 1, 2, 3", code)
            }
            ConfigError::InvalidIntensity(level) => write!(
                f,
                "intensity {} is out of range 0-{}",
                level, INTENSITY_MAX
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// A configuration for the chain. Only the module count is mandatory; mounting options and the
/// power-on intensity can be set with the builder methods. A `Config` is validated and consumed
/// by `Display::new`, after which it cannot change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) num_modules: usize,
    pub(crate) rotation: Rotation,
    pub(crate) reversed: bool,
    pub(crate) intensity: u8,
}

impl Config {
    /// Create a new configuration for a chain of `num_modules` modules, unrotated, in natural
    /// chain order, at full intensity.
    pub fn new(num_modules: usize) -> Self {
        Config {
            num_modules,
            rotation: Rotation::None,
            reversed: false,
            intensity: INTENSITY_MAX,
        }
    }

    /// Extend this `Config` to rotate every module.
    pub fn rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Extend this `Config` to reverse the order of modules in the chain, for boards where the
    /// first module on the bus is the leftmost one.
    pub fn reversed(self, reversed: bool) -> Self {
        Self { reversed, ..self }
    }

    /// Extend this `Config` to bring the chain up at a different intensity. See
    /// `Command::Intensity`.
    pub fn intensity(self, intensity: u8) -> Self {
        Self { intensity, ..self }
    }

    pub fn num_modules(&self) -> usize {
        self.num_modules
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self.num_modules {
            0 => return Err(ConfigError::NoModules),
            n if n > MAX_MODULES => return Err(ConfigError::TooManyModules(n)),
            _ => {}
        }
        if self.intensity > INTENSITY_MAX {
            return Err(ConfigError::InvalidIntensity(self.intensity));
        }
        Ok(())
    }

    /// Translate a logical module position into its position in the chain frame.
    pub(crate) fn physical_index(&self, logical: usize) -> usize {
        crate::orientation::physical_index(logical, self.num_modules, self.reversed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::new(4);
        assert_eq!(cfg.num_modules(), 4);
        assert_eq!(cfg.rotation, Rotation::None);
        assert!(!cfg.reversed);
        assert_eq!(cfg.intensity, 15);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn module_count_bounds() {
        assert_eq!(Config::new(0).validate(), Err(ConfigError::NoModules));
        assert_eq!(Config::new(1).validate(), Ok(()));
        assert_eq!(Config::new(MAX_MODULES).validate(), Ok(()));
        assert_eq!(
            Config::new(MAX_MODULES + 1).validate(),
            Err(ConfigError::TooManyModules(MAX_MODULES + 1))
        );
    }

    #[test]
    fn intensity_bounds() {
        assert_eq!(Config::new(1).intensity(0).validate(), Ok(()));
        assert_eq!(
            Config::new(1).intensity(16).validate(),
            Err(ConfigError::InvalidIntensity(16))
        );
    }

    #[test]
    fn rotation_codes() {
        assert_eq!(Rotation::try_from(0), Ok(Rotation::None));
        assert_eq!(Rotation::try_from(1), Ok(Rotation::Clockwise));
        assert_eq!(Rotation::try_from(2), Ok(Rotation::CounterClockwise));
        assert_eq!(Rotation::try_from(3), Ok(Rotation::OneEighty));
        assert_eq!(Rotation::try_from(4), Err(ConfigError::InvalidRotation(4)));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::InvalidRotation(9).to_string(),
            "rotation code 9 is not one of 0, 1, 2, 3"
        );
        assert_eq!(
            ConfigError::NoModules.to_string(),
            "chain must contain at least one module"
        );
    }
}
