//! Pulse sensor trait

/// Errors that can occur reading the optical pulse sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// No skin contact detected (signal floor)
    NoContact,
    /// Front-end saturated (ambient light / pressed too hard)
    Saturated,
    /// No plausible rate available (outside the valid band, or no beat
    /// lock yet)
    OutOfRange,
    /// ADC conversion error
    ConversionError,
}

/// Trait for heart rate sensors
///
/// Implementations handle the specific front-end (PPG photodiode, ECG
/// electrodes, ...). The reading is cosmetic: presentation code may show
/// or color by it, but it never alters session timing.
pub trait PulseSensor {
    /// Read the smoothed heart rate
    ///
    /// Returns a fixed-point value with 0.1 bpm resolution, e.g. 60.5 bpm
    /// is returned as 605.
    ///
    /// Takes `&mut self` because sampling typically requires mutable
    /// access to the ADC.
    fn read_bpm_x10(&mut self) -> Result<u16, SensorError>;

    /// Read the heart rate in whole bpm
    fn read_bpm(&mut self) -> Result<u16, SensorError> {
        self.read_bpm_x10().map(|bpm| bpm / 10)
    }
}
