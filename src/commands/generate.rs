//! `registry-idgen generate` command.

use crate::adapters::live::LiveIdGenerator;
use crate::ports::IdGenerator;

/// Execute the `generate` command.
///
/// # Errors
///
/// Returns an error string if `count` is zero.
pub fn run(count: usize) -> Result<(), String> {
    if count == 0 {
        return Err("--count must be at least 1".to_string());
    }
    let gen = LiveIdGenerator::new();
    for _ in 0..count {
        println!("{}", gen.generate_id());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn zero_count_is_rejected() {
        assert!(run(0).is_err());
        assert!(run(2).is_ok());
    }
}
