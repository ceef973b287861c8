//! This module provides a trait [`Input`] for representing inputs generated for property based
//! testing

use proptest::{prop_assert_eq, test_runner::TestCaseResult};

/// Represents an input generated for testing purposes.
///
/// The input renders into source text, and whatever the phase under test produces from that text
/// is checked against it.
pub trait Input<Output> {
    /// Verifies that the given output complies with this input.
    ///
    /// # Errors
    /// [`proptest::test_runner::TestCaseError`]: for any reason the assertion fails.
    fn assert(self, output: Output) -> TestCaseResult;
}

impl<'i, 'o, T, U> Input<&'o [T]> for &'i [U]
where
    for<'a, 'b> &'a U: Input<&'b T>,
{
    fn assert(self, output: &'o [T]) -> TestCaseResult {
        prop_assert_eq!(self.len(), output.len());

        for (input, output) in self.iter().zip(output) {
            input.assert(output)?;
        }

        Ok(())
    }
}
