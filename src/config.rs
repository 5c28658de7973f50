//! Defines structs for storing register values of commands in the SSD1308 that are associated with
//! relatively-static configuration.

use crate::command::*;
use crate::interface;

/// The portion of the configuration which will persist inside the `Display` because it shares
/// registers with functions that can be changed after initialization (`Display::flip`). This
/// allows the rest of the `Config` struct to be thrown away to save RAM after `Display::init`
/// finishes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PersistentConfig {
    com_scan_direction: ComScanDirection,
    segment_remap: SegmentRemap,
}

impl PersistentConfig {
    /// Transmit commands to the display at `iface` necessary to put that display into the
    /// orientation encoded in `self`, mirrored on both axes if `flipped`.
    pub(crate) fn send<DI>(&self, iface: &mut DI, flipped: bool) -> Result<(), DI::Error>
    where
        DI: interface::DisplayInterface,
    {
        let (com, seg) = match flipped {
            false => (self.com_scan_direction, self.segment_remap),
            true => (
                self.com_scan_direction.flipped(),
                self.segment_remap.flipped(),
            ),
        };
        Command::SetComScanDirection(com).send(iface)?;
        Command::SetSegmentRemap(seg).send(iface)
    }
}

/// A configuration for the display. Builder methods offer a declarative way to either send a
/// configuration command at init time, or to leave it at the chip's POR default.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) persistent_config: PersistentConfig,
    contrast_cmd: Option<Command>,
    clock_divide_cmd: Option<Command>,
    mux_ratio_cmd: Option<Command>,
    display_offset_cmd: Option<Command>,
    com_pins_cmd: Option<Command>,
    precharge_period_cmd: Option<Command>,
    vcomh_deselect_cmd: Option<Command>,
    charge_pump_cmd: Option<Command>,
}

impl Config {
    /// Create a new configuration. COM scan direction and segment remap are mandatory because
    /// they decide which way up the image appears on the module, so they must be provided in the
    /// constructor. All other options can be optionally set by calling the provided builder
    /// methods on `Config`.
    pub fn new(com_scan_direction: ComScanDirection, segment_remap: SegmentRemap) -> Self {
        Config {
            persistent_config: PersistentConfig {
                com_scan_direction,
                segment_remap,
            },
            contrast_cmd: None,
            clock_divide_cmd: None,
            mux_ratio_cmd: None,
            display_offset_cmd: None,
            com_pins_cmd: None,
            precharge_period_cmd: None,
            vcomh_deselect_cmd: None,
            charge_pump_cmd: None,
        }
    }

    /// Extend this `Config` to explicitly configure display contrast. See
    /// `Command::SetContrast`.
    pub fn contrast(self, contrast: u8) -> Self {
        Self {
            contrast_cmd: Some(Command::SetContrast(contrast)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the display clock divider and oscillator
    /// frequency. See `Command::SetClockDivide`.
    pub fn clock_divide(self, divide: u8, fosc: u8) -> Self {
        Self {
            clock_divide_cmd: Some(Command::SetClockDivide(divide, fosc)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the number of active rows. See
    /// `Command::SetMuxRatio`.
    pub fn mux_ratio(self, ratio: u8) -> Self {
        Self {
            mux_ratio_cmd: Some(Command::SetMuxRatio(ratio)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the COM line offset. See
    /// `Command::SetDisplayOffset`.
    pub fn display_offset(self, offset: u8) -> Self {
        Self {
            display_offset_cmd: Some(Command::SetDisplayOffset(offset)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure how COM pins are wired to the panel. See
    /// `Command::SetComPins`.
    pub fn com_pins(self, layout: ComLayout, left_right_remap: bool) -> Self {
        Self {
            com_pins_cmd: Some(Command::SetComPins(layout, left_right_remap)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure OLED drive pre-charge periods. See
    /// `Command::SetPrechargePeriod`.
    pub fn precharge_period(self, phase_1: u8, phase_2: u8) -> Self {
        Self {
            precharge_period_cmd: Some(Command::SetPrechargePeriod(phase_1, phase_2)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly configure the VCOMH deselect level. See
    /// `Command::SetVcomhDeselect`.
    pub fn vcomh_deselect(self, level: u8) -> Self {
        Self {
            vcomh_deselect_cmd: Some(Command::SetVcomhDeselect(level)),
            ..self
        }
    }

    /// Extend this `Config` to explicitly enable or disable the charge pump. Modules without an
    /// external VCC supply need it enabled. See `Command::SetChargePump`.
    pub fn charge_pump(self, enabled: bool) -> Self {
        Self {
            charge_pump_cmd: Some(Command::SetChargePump(enabled)),
            ..self
        }
    }

    /// Transmit commands to the display at `iface` necessary to put that display into the
    /// configuration encoded in `self`.
    pub(crate) fn send<DI>(&self, iface: &mut DI) -> Result<(), DI::Error>
    where
        DI: interface::DisplayInterface,
    {
        [
            self.clock_divide_cmd,
            self.mux_ratio_cmd,
            self.display_offset_cmd,
            self.charge_pump_cmd,
            self.com_pins_cmd,
            self.contrast_cmd,
            self.precharge_period_cmd,
            self.vcomh_deselect_cmd,
        ]
        .iter()
        .flatten()
        .try_for_each(|c| c.send(iface))
    }
}

impl Default for Config {
    /// The orientation of the Grove OLED 0.96" module, with every other register left at its POR
    /// default.
    fn default() -> Self {
        Config::new(ComScanDirection::Decrement, SegmentRemap::Reversed)
    }
}
