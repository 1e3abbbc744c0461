//! Fields scraped from the thermostat's status page.

/// How a field's token turns into a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric, reported in Celsius; converted when the unit runs in Fahrenheit.
    Temperature,
    /// Numeric, reported as found.
    Plain,
    /// Operating-state word mapped through [`HvacState`].
    HvacState,
}

/// One scraped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Stream name under the driver root.
    pub name: &'static str,
    /// Literal text that starts the field's line on the page.
    pub marker: &'static str,
    /// Position of the value after splitting the match on `"`.
    pub token: usize,
    pub unit: &'static str,
    pub kind: FieldKind,
}

/// Everything read from `index.shtml`.
pub static FIELDS: [FieldDescriptor; 7] = [
    FieldDescriptor {
        name: "zone_temp",
        marker: "avgtemp =",
        token: 1,
        unit: "C",
        kind: FieldKind::Temperature,
    },
    FieldDescriptor {
        name: "humidity",
        marker: "printFSC(\"Relative Humidity\"",
        token: 3,
        unit: "rh",
        kind: FieldKind::Plain,
    },
    FieldDescriptor {
        name: "hvac_state",
        marker: "hvacStateS =",
        token: 1,
        unit: "state",
        kind: FieldKind::HvacState,
    },
    FieldDescriptor {
        name: "cool_setting",
        marker: "printFSC(\"Cool Setting\"",
        token: 3,
        unit: "C",
        kind: FieldKind::Temperature,
    },
    // Unconverted: the unit reports it in Fahrenheit regardless of scale.
    FieldDescriptor {
        name: "heat_setting",
        marker: "printFSC(\"Heat Setting\"",
        token: 3,
        unit: "F",
        kind: FieldKind::Plain,
    },
    FieldDescriptor {
        name: "schedule_cool",
        marker: "printFSC(\"Cool\"",
        token: 3,
        unit: "C",
        kind: FieldKind::Temperature,
    },
    FieldDescriptor {
        name: "schedule_heat",
        marker: "printFSC(\"Heat\"",
        token: 3,
        unit: "C",
        kind: FieldKind::Temperature,
    },
];

/// Settings-page line carrying the temperature scale in token 3.
pub const SCALE_MARKER: &str = "printFSC(\"Temperature Scale\"";

/// Operating state reported in `hvacStateS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HvacState {
    Off,
    Cool,
    Cool2,
    Heat,
    Heat2,
    AuxHeat,
    Delay,
    /// Anything the table does not name.
    Other,
}

impl HvacState {
    /// Map the word shown on the page, case-insensitively.
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        match word.to_ascii_uppercase().as_str() {
            "OFF" => Self::Off,
            "COOL" => Self::Cool,
            "COOL2" => Self::Cool2,
            "HEAT" => Self::Heat,
            "HEAT2" => Self::Heat2,
            "AUX HT" => Self::AuxHeat,
            "DELAY" => Self::Delay,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Cool => 1,
            Self::Cool2 => 2,
            Self::Heat => 3,
            Self::Heat2 => 4,
            Self::AuxHeat => 5,
            Self::Delay => 6,
            Self::Other => 7,
        }
    }
}
