/// Numerator of the per-block base fee growth bound (12.5%).
const BASE_FEE_GROWTH_NUM: u128 = 1125;
/// Denominator of the per-block base fee growth bound.
const BASE_FEE_GROWTH_DEN: u128 = 1000;

/// The highest base fee a block `blocks_in_future` blocks ahead can have,
/// given the current `base_fee`.
///
/// Each block may raise the base fee by at most 12.5%. This applies
/// `floor(base * 1125 / 1000) + 1` once per block, saturating at
/// [`u128::MAX`].
pub const fn max_base_fee_in_future_block(base_fee: u128, blocks_in_future: u64) -> u128 {
    let mut max = base_fee;
    let mut i = 0;
    while i < blocks_in_future {
        max = match max.checked_mul(BASE_FEE_GROWTH_NUM) {
            Some(scaled) => scaled / BASE_FEE_GROWTH_DEN + 1,
            None => return u128::MAX,
        };
        i += 1;
    }
    max
}
