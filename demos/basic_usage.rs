// ============================================================================
// Basic Usage Example
// ============================================================================

use sigdec::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    println!("=== Sigdec Example ===\n");

    // Counting: text preserves trailing-zero precision, natives cannot
    println!("Counting significant figures...");
    println!("  sigfigs_of(\"1.230\") = {}", sigfigs_of("1.230").unwrap());
    println!("  sigfigs_of(\"100.\")  = {}", sigfigs_of("100.").unwrap());
    println!("  sigfigs_of(100)     = {}", sigfigs_of(100).unwrap());
    println!("  sigfigs_of(1.0f64)  = {}\n", sigfigs_of(1.0).unwrap());

    // Arithmetic: addition tracks decimal places, multiplication sigfigs
    println!("Arithmetic with precision resolution...");
    println!("  add(1.23, 4.5)   = {}", add(1.23, 4.5, None).unwrap());
    println!("  add(123, 4.567)  = {}", add(123, 4.567, None).unwrap());
    println!("  mul(100, 2.5)    = {}", mul(100, 2.5, None).unwrap());
    println!("  div(1.000, 3.000) = {}\n", div("1.000", "3.000", None).unwrap());

    // Rounding with a configurable decision threshold
    println!("Threshold-configurable rounding...");
    println!("  round(123.456, 3, 5) = {}", round(123.456, 3, 5).unwrap());
    println!("  round(123.456, 3, 3) = {}", round(123.456, 3, 3).unwrap());
    println!("  truncate(999, 2)     = {}\n", truncate(999, 2).unwrap());

    // Notation
    println!("Notation...");
    println!("  to_scientific(\"0.00250\")  = {}", to_scientific("0.00250", None).unwrap());
    println!("  to_engineering(0.000123)  = {}", to_engineering(0.000123, None).unwrap());
    println!("  to_decimal_places(5, 3)   = {}\n", to_decimal_places(5, 3).unwrap());

    // Reducers skip unusable elements
    println!("Reducers...");
    let values: Vec<sigdec::DecimalInput> = vec![1.into(), "invalid".into(), 3.into()];
    println!("  max([1, \"invalid\", 3]) = {}", max(&values, None).unwrap());

    // Percentages
    println!("  percentage(1, 3, 4 sigfigs) = {}", percentage(1, 3, 4u32).unwrap());

    match div(5, 0, None) {
        Ok(_) => unreachable!(),
        Err(err) => println!("\ndiv(5, 0) -> error: {err}"),
    }
}
