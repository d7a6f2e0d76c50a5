//! Locale-sensitive configuration for lexing and number parsing.

/// The locale-dependent characters the lexer and number parser honor.
///
/// The same grammar accepts `"2.5"` or `"2,5"` depending on the configured
/// separators; nothing else about the pipeline changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Separates the integer part of a literal from its fraction.
    pub decimal_separator: char,
    /// Separates call arguments.
    pub list_separator: char,
    /// Recognized as the `+` operator and as an explicit exponent sign.
    pub positive_sign: char,
    /// Recognized as the `-` operator and as an explicit exponent sign.
    pub negative_sign: char,
}

impl NumberFormat {
    /// The invariant profile: `.` decimal separator, `,` list separator,
    /// ASCII signs.
    pub const fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            list_separator: ',',
            positive_sign: '+',
            negative_sign: '-',
        }
    }

    /// The comma-decimal profile used by many European locales: `,` decimal
    /// separator, `;` list separator.
    pub const fn comma_decimal() -> Self {
        Self {
            decimal_separator: ',',
            list_separator: ';',
            positive_sign: '+',
            negative_sign: '-',
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Angle interpretation for the trigonometric built-ins.
///
/// Affects only how the trig-family functions read their input; every other
/// built-in resolves identically in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    #[default]
    Radian,
    Degree,
}
