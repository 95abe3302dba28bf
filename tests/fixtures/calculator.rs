//! Annotated fixture: type declaration and the arithmetic API.

use std::fmt;

#[derive(Debug, Default)]
#[api_description("Integer calculator with a running total")]
pub struct Calculator {
    total: i64,
}

impl Calculator {
    /// Adds two bounded operands.
    #[api_method]
    #[api_description("Adds two numbers")]
    #[api_return(api_int_validation(0, 200))]
    pub fn add(
        &self,
        #[api_description("Left operand")]
        #[api_int_validation(min = 0, max = 100)]
        #[api_required]
        a: i64,
        #[api_description("Right operand")] b: i64,
    ) -> i64 {
        a + b
    }

    #[api_method]
    pub fn reset(&mut self) {
        self.total = 0;
    }

    #[api_description("Not exposed: no marker")]
    pub fn peek(&self, #[api_required] index: usize) -> i64 {
        let _ = index;
        self.total
    }

    #[api_method]
    fn audit(&self) {}
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{total: {}}}", self.total)
    }
}
