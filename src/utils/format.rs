/// Unit system used when rendering byte counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteUnits {
    /// 1024-based: KiB, MiB, ...
    #[default]
    Iec,
    /// 1000-based: kB, MB, ...
    Si,
}

const IEC_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];
const SI_UNITS: [&str; 9] = ["B", "kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

impl ByteUnits {
    fn base(self) -> f64 {
        match self {
            ByteUnits::Iec => 1024.0,
            ByteUnits::Si => 1000.0,
        }
    }

    fn names(self) -> &'static [&'static str] {
        match self {
            ByteUnits::Iec => &IEC_UNITS,
            ByteUnits::Si => &SI_UNITS,
        }
    }
}

/// Renders `bytes` in the largest unit that keeps the value at or above one.
pub fn format_bytes(bytes: u64, units: ByteUnits) -> String {
    let names = units.names();
    let base = units.base();
    let mut value = bytes as f64;
    let mut exp = 0;
    while value >= base && exp < names.len() - 1 {
        value /= base;
        exp += 1;
    }

    if exp == 0 {
        format!("{} {}", bytes, names[0])
    } else {
        format!("{:.2} {}", value, names[exp])
    }
}

/// `H:MM:SS` from one hour on, `M:SS` below.
pub fn format_duration(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds / 60) % 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
