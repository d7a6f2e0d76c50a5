//! Built-in function and constant catalogs.
//!
//! The catalogs are plain `fn` lookups: immutable, shared without
//! synchronization, resolved by name. Function lookups are case-sensitive;
//! the reserved constants are case-insensitive.

use crate::AngleUnit;

/// A built-in taking one argument.
pub type MonadicFn = fn(f64) -> f64;

/// A built-in taking two arguments.
pub type DyadicFn = fn(f64, f64) -> f64;

/// One degree, in radians.
const DEGREE: f64 = 0.017_453_292_519_943_295;

/// Resolve a 1-argument built-in, honoring the angle unit for the
/// trig-family subset.
pub fn monadic(name: &str, angle_unit: AngleUnit) -> Option<MonadicFn> {
    if angle_unit == AngleUnit::Degree {
        if let Some(function) = degree_monadic(name) {
            return Some(function);
        }
    }

    radian_monadic(name)
}

/// Resolve a 2-argument built-in.
pub fn dyadic(name: &str) -> Option<DyadicFn> {
    let function: DyadicFn = match name {
        "log" => |x, new_base| x.log(new_base),
        "max" => f64::max,
        "min" => f64::min,
        _ => return None,
    };

    Some(function)
}

/// True if the name belongs to either built-in function catalog, in any
/// angle-unit mode.
pub fn is_builtin_function(name: &str) -> bool {
    radian_monadic(name).is_some() || dyadic(name).is_some()
}

/// Resolve a reserved constant: `pi` or `π`, and `e` (case-insensitive).
pub fn constant(name: &str) -> Option<f64> {
    if name.eq_ignore_ascii_case("pi") || name == "\u{03c0}" || name == "\u{03a0}" {
        return Some(std::f64::consts::PI);
    }

    if name.eq_ignore_ascii_case("e") {
        return Some(std::f64::consts::E);
    }

    None
}

fn radian_monadic(name: &str) -> Option<MonadicFn> {
    let function: MonadicFn = match name {
        "abs" => f64::abs,
        "acos" => f64::acos,
        "asin" => f64::asin,
        "atan" => f64::atan,
        "ceiling" => f64::ceil,
        "cos" => f64::cos,
        "cosh" => f64::cosh,
        "floor" => f64::floor,
        "log" => f64::ln,
        "log10" => f64::log10,
        "round" => f64::round,
        "sin" => f64::sin,
        "sinh" => f64::sinh,
        "sqrt" => f64::sqrt,
        "tan" => f64::tan,
        "tanh" => f64::tanh,
        _ => return None,
    };

    Some(function)
}

/// Degree-mode variants: the input is converted from degrees to radians
/// before the underlying function applies. The table shadows only the
/// trig-family entries; everything else falls through to the radian
/// catalog.
fn degree_monadic(name: &str) -> Option<MonadicFn> {
    let function: MonadicFn = match name {
        "acos" => |x| (x * DEGREE).acos(),
        "asin" => |x| (x * DEGREE).asin(),
        "atan" => |x| (x * DEGREE).atan(),
        "cos" => |x| (x * DEGREE).cos(),
        "cosh" => |x| (x * DEGREE).cosh(),
        "sin" => |x| (x * DEGREE).sin(),
        "sinh" => |x| (x * DEGREE).sinh(),
        "tan" => |x| (x * DEGREE).tan(),
        "tanh" => |x| (x * DEGREE).tanh(),
        _ => return None,
    };

    Some(function)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monadic_lookup_is_case_sensitive() {
        assert!(monadic("sin", AngleUnit::Radian).is_some());
        assert!(monadic("Sin", AngleUnit::Radian).is_none());
        assert!(monadic("SIN", AngleUnit::Degree).is_none());
    }

    #[test]
    fn degree_mode_shadows_trig_only() {
        let sin_deg = monadic("sin", AngleUnit::Degree).unwrap();
        assert!((sin_deg(90.0) - 1.0).abs() < 1e-15);

        // sqrt has no degree variant; both modes resolve the same function
        let sqrt_rad = monadic("sqrt", AngleUnit::Radian).unwrap();
        let sqrt_deg = monadic("sqrt", AngleUnit::Degree).unwrap();
        assert_eq!(sqrt_rad(9.0), sqrt_deg(9.0));
    }

    #[test]
    fn dyadic_log_uses_new_base() {
        let log = dyadic("log").unwrap();
        assert!((log(8.0, 2.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn constants_are_case_insensitive() {
        assert_eq!(constant("pi"), Some(std::f64::consts::PI));
        assert_eq!(constant("PI"), Some(std::f64::consts::PI));
        assert_eq!(constant("π"), Some(std::f64::consts::PI));
        assert_eq!(constant("e"), Some(std::f64::consts::E));
        assert_eq!(constant("E"), Some(std::f64::consts::E));
        assert_eq!(constant("tau"), None);
    }

    #[test]
    fn builtin_membership_spans_both_catalogs() {
        assert!(is_builtin_function("sin"));
        assert!(is_builtin_function("max"));
        assert!(!is_builtin_function("foo"));
    }
}
