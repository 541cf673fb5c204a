//! Acquisition and sink parameter enums.
//!
//! Each enum is persisted as its integer code. The codes are part of the
//! on-disk format and must never be renumbered.

use std::fmt;

use serde::{Serialize, Serializer};

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal, )+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
        pub enum $name {
            $( $(#[$vmeta])* #[value(name = $label)] $variant, )+
        }

        impl $name {
            /// Integer code written to the settings document
            pub fn code(self) -> i32 {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i32(self.code())
            }
        }
    };
}

coded_enum! {
    /// Network transport of the data sink
    pub enum Protocol {
        Tcp = 0 => "tcp",
        Udp = 1 => "udp",
    }
    default = Tcp;
}

coded_enum! {
    /// File format for captured data
    pub enum DataFormat {
        Wav = 0 => "wav",
        Tdms = 1 => "tdms",
        Csv = 2 => "csv",
    }
    default = Wav;
}

coded_enum! {
    /// Sample representation: raw ADC counts or volts
    pub enum DataType {
        Raw = 1 => "raw",
        Volt = 2 => "volt",
    }
    default = Raw;
}

coded_enum! {
    /// Input channels to acquire
    pub enum Channel {
        Ch1 = 1 => "ch1",
        Ch2 = 2 => "ch2",
        Both = 3 => "both",
    }
    default = Ch1;
}

coded_enum! {
    pub enum Resolution {
        Bit8 = 1 => "8bit",
        Bit16 = 2 => "16bit",
    }
    default = Bit8;
}

coded_enum! {
    /// Input attenuator setting (attenuated and high-res boards)
    pub enum Attenuator {
        A1To1 = 1 => "1:1",
        A1To20 = 2 => "1:20",
    }
    default = A1To1;
}

coded_enum! {
    /// Input coupling (high-res board only)
    pub enum Coupling {
        Ac = 1 => "ac",
        Dc = 2 => "dc",
    }
    default = Ac;
}
