//! Annotated fixture: more API methods for the calculator, in a second file.

use super::Calculator;

impl Calculator {
    #[api_method]
    #[api_description("Divides the total")]
    #[api_return(api_required(false))]
    pub fn divide(&mut self, #[api_int_validation(1, 1000)] divisor: i64) -> Option<i64> {
        if divisor == 0 {
            return None;
        }
        self.total /= divisor;
        Some(self.total)
    }
}

pub struct Undocumented;

impl Undocumented {
    pub fn noop(&self) {}
}
