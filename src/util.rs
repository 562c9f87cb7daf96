/// Number formatting helpers.
///
/// Renders results the way a C++ output stream does by default: a given
/// number of significant digits, trailing zeros dropped, and scientific
/// notation for very large or very small magnitudes.
pub mod num;
