use std::fmt;

/// Start of the default range (inclusive).
pub const DEFAULT_START: u64 = 1;
/// End of the default range (exclusive).
pub const DEFAULT_END: u64 = 10_000;

/// Properties computed for a single integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub n: u64,
    pub sum_of_squares: u128,
    pub is_perfect: bool,
    /// Name of the pool worker that produced the record, if any.
    pub worker_id: Option<String>,
}

impl ResultRecord {
    /// The record without its worker id, for comparing across strategies.
    pub fn triple(&self) -> (u64, u128, bool) {
        (self.n, self.sum_of_squares, self.is_perfect)
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(worker) = &self.worker_id {
            write!(f, "Worker {}: ", worker)?;
        }
        write!(
            f,
            "Number: {}, Sum of Squares: {}, Perfect: {}",
            self.n, self.sum_of_squares, self.is_perfect
        )
    }
}

pub type ResultCollection = Vec<ResultRecord>;

/// Largest `n` whose sum of squares fits in a `u128`.
pub const MAX_N: u64 = 10_069_012_961_344;

/// Sum of i² for i in 1..=n, or `None` if it does not fit in a `u128`.
pub fn checked_sum_of_squares(n: u64) -> Option<u128> {
    let mut a = n as u128;
    let mut b = a + 1;
    let mut c = 2 * a + 1;

    // Divide out 2 and 3 before multiplying so only the result itself can overflow
    if a % 2 == 0 {
        a /= 2;
    } else {
        b /= 2;
    }
    if a % 3 == 0 {
        a /= 3;
    } else if b % 3 == 0 {
        b /= 3;
    } else {
        c /= 3;
    }

    a.checked_mul(b)?.checked_mul(c)
}

/// Sum of i² for i in 1..=n. Zero for n = 0.
///
/// # Panics
///
/// Panics if `n` is greater than [`MAX_N`].
pub fn sum_of_squares(n: u64) -> u128 {
    checked_sum_of_squares(n)
        .unwrap_or_else(|| panic!("sum of squares of {} does not fit in u128", n))
}

/// True when the proper divisors of `n` sum to `n`.
pub fn is_perfect(n: u64) -> bool {
    if n <= 1 {
        return false;
    }

    // 1 is always a proper divisor; walk the remaining divisor pairs up to √n.
    // Accumulate in u128 so a pair added past n cannot overflow.
    let target = n as u128;
    let mut sum: u128 = 1;
    let mut i: u64 = 2;
    while i <= n / i {
        if n.is_multiple_of(i) {
            sum += i as u128;
            let pair = n / i;
            if pair != i {
                sum += pair as u128;
            }
            if sum > target {
                return false;
            }
        }
        i += 1;
    }

    sum == target
}

pub fn process_one(n: u64, worker_id: Option<String>) -> ResultRecord {
    ResultRecord {
        n,
        sum_of_squares: sum_of_squares(n),
        is_perfect: is_perfect(n),
        worker_id,
    }
}

/// Processes every integer of `[start, end)` in increasing order.
pub fn process_range(start: u64, end: u64) -> ResultCollection {
    (start..end).map(|n| process_one(n, None)).collect()
}
