use crate::{LlmApiError, Result};
use regex::Regex;

lazy_static! {
    /// A maximal run of decimal digits (any script) with a word boundary on each side.
    static ref DIGIT_RUN: Regex = Regex::new(r"\b\d+\b").unwrap();
    static ref DECIMAL_DIGIT: Regex = Regex::new(r"^\d$").unwrap();
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a Unicode decimal digit (`Nd`), e.g. `'٤'` or `'４'` is 4.
///
/// `Nd` digits are assigned in contiguous blocks running 0 to 9, so the value
/// is the distance from the start of the run of digits the char sits in.
fn digit_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut offset = 0;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    Some(offset % 10)
}

/// Returns the value of the last number in a model's answer.
///
/// Models tend to show their working before stating a result, so of all the
/// digit runs found scanning left to right, only the last one counts. Runs
/// glued to letters (`"abc123"`) are not matched, and leading zeros are read
/// as decimal (`"007"` is 7). Digits from any script count, so full-width
/// `"４２"` and Arabic-Indic `"٤٢"` both read as 42.
///
/// # Examples
///
/// ```
/// use llm_api::text_utils::take_out_number;
///
/// let answer = "The answer is 42, but first I computed 7";
/// assert_eq!(take_out_number(answer).unwrap(), 7);
/// ```
pub fn take_out_number(answer: &str) -> Result<u64> {
    let last = DIGIT_RUN
        .find_iter(answer)
        .last()
        .ok_or(LlmApiError::NoNumberFound)?;
    last.as_str()
        .chars()
        .try_fold(0u64, |acc, c| {
            acc.checked_mul(10)?.checked_add(u64::from(digit_value(c)?))
        })
        .ok_or_else(|| {
            LlmApiError::NumberOutOfRange(format!("{} does not fit in u64", last.as_str()))
        })
}
