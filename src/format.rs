//! Numeric display helpers: SI-prefixed power and emission values and
//! percentages.

const SI_PREFIXES: [(i32, &str); 9] = [
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// Round `value` to `digits` significant digits and express it with an SI
/// prefix, keeping trailing zeros: `1234.0, 3` → `"1.23k"`.
pub fn format_si(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return "?".to_string();
    }
    let digits = digits.max(1) as i32;
    if value == 0.0 {
        return format!("{:.*}", (digits - 1) as usize, 0.0);
    }

    let rounded = round_significant(value, digits);
    let exponent = rounded.abs().log10().floor() as i32;
    let si_exponent = (exponent.div_euclid(3) * 3).clamp(-12, 12);
    let prefix = SI_PREFIXES
        .iter()
        .find(|(e, _)| *e == si_exponent)
        .map_or("", |(_, p)| p);

    let scaled = rounded / 10f64.powi(si_exponent);
    let integer_digits = scaled.abs().log10().floor() as i32 + 1;
    let decimals = (digits - integer_digits).max(0) as usize;

    format!("{scaled:.decimals$}{prefix}")
}

fn round_significant(value: f64, digits: i32) -> f64 {
    let exponent = value.abs().log10().floor() as i32;
    let magnitude = 10f64.powi(exponent - digits + 1);
    (value / magnitude).round() * magnitude
}

/// Power given in MW, e.g. `1234.0` → `"1.23GW"`.
pub fn format_power(megawatts: f64, digits: usize) -> String {
    format!("{}W", format_si(megawatts * 1e6, digits))
}

/// Display unit for a series whose largest value is `max_megawatts`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerScale {
    pub unit: &'static str,
    /// Divide MW values by this to express them in `unit`.
    pub factor: f64,
}

pub fn scale_power(max_megawatts: f64) -> PowerScale {
    if max_megawatts < 1.0 {
        PowerScale { unit: "kW", factor: 1e-3 }
    } else if max_megawatts < 1e3 {
        PowerScale { unit: "MW", factor: 1.0 }
    } else {
        PowerScale { unit: "GW", factor: 1e3 }
    }
}

/// CO₂ mass given in grams; a ton or more is shown in tons.
pub fn format_co2(grams: f64, digits: usize) -> String {
    if grams.abs() >= 1e6 {
        format!("{}t", format_si(grams / 1e6, digits))
    } else {
        format!("{}g", format_si(grams, digits))
    }
}

/// A ratio in `[0, 1]` as a percentage: `0.8712, 0` → `"87 %"`.
pub fn format_percentage(ratio: f64, digits: usize) -> String {
    if !ratio.is_finite() {
        return "?".to_string();
    }
    format!("{:.*} %", digits, ratio * 100.0)
}
