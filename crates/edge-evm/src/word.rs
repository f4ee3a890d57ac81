//! 256-bit word arithmetic
//!
//! Every operation is total: arithmetic wraps modulo 2^256 and division or
//! modulo by zero yields zero. Signed variants read the same bits as
//! two's complement.

use primitive_types::{U256, U512};

/// Word with only the sign bit set (the most negative signed value)
pub const MIN_NEGATIVE: U256 = U256([0, 0, 0, 0x8000_0000_0000_0000]);

/// Boolean as a word
pub fn from_bool(value: bool) -> U256 {
    if value {
        U256::one()
    } else {
        U256::zero()
    }
}

/// Value as `u64`, or `None` when the upper bits are set
pub fn to_u64(value: &U256) -> Option<u64> {
    if value.0[1] != 0 || value.0[2] != 0 || value.0[3] != 0 {
        return None;
    }
    Some(value.0[0])
}

/// Value as `usize`, or `None` when it does not fit
pub fn to_usize(value: &U256) -> Option<usize> {
    to_u64(value).and_then(|v| usize::try_from(v).ok())
}

/// Value as `usize`, saturating at `usize::MAX`
pub fn saturating_usize(value: &U256) -> usize {
    to_usize(value).unwrap_or(usize::MAX)
}

/// Whether the word is negative in two's complement
pub fn is_negative(value: &U256) -> bool {
    value.bit(255)
}

/// Two's complement negation: `!v + 1`
pub fn twos_complement(value: U256) -> U256 {
    (!value).overflowing_add(U256::one()).0
}

fn abs(value: U256) -> U256 {
    if is_negative(&value) {
        twos_complement(value)
    } else {
        value
    }
}

fn low_half(value: U512) -> U256 {
    let U512(ref limbs) = value;
    U256([limbs[0], limbs[1], limbs[2], limbs[3]])
}

/// ADD
pub fn add(a: U256, b: U256) -> U256 {
    a.overflowing_add(b).0
}

/// SUB
pub fn sub(a: U256, b: U256) -> U256 {
    a.overflowing_sub(b).0
}

/// MUL
pub fn mul(a: U256, b: U256) -> U256 {
    a.overflowing_mul(b).0
}

/// DIV
pub fn div(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        return U256::zero();
    }
    a / b
}

/// MOD
pub fn rem(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        return U256::zero();
    }
    a % b
}

/// SDIV: truncates toward zero; `MIN / -1` wraps to `MIN`
pub fn sdiv(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        return U256::zero();
    }
    let negative = is_negative(&a) != is_negative(&b);
    let quotient = abs(a) / abs(b);
    if negative {
        twos_complement(quotient)
    } else {
        quotient
    }
}

/// SMOD: result takes the sign of the dividend
pub fn smod(a: U256, b: U256) -> U256 {
    if b.is_zero() {
        return U256::zero();
    }
    let remainder = abs(a) % abs(b);
    if is_negative(&a) {
        twos_complement(remainder)
    } else {
        remainder
    }
}

/// ADDMOD with a 512-bit intermediate sum
pub fn addmod(a: U256, b: U256, n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let sum = U512::from(a) + U512::from(b);
    low_half(sum % U512::from(n))
}

/// MULMOD with a 512-bit intermediate product
pub fn mulmod(a: U256, b: U256, n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    low_half(a.full_mul(b) % U512::from(n))
}

/// EXP modulo 2^256
pub fn exp(base: U256, exponent: U256) -> U256 {
    base.overflowing_pow(exponent).0
}

/// SIGNEXTEND: extend the sign bit of byte `b` (counted from the low end)
pub fn signextend(b: U256, x: U256) -> U256 {
    if b >= U256::from(31) {
        return x;
    }
    let bit = b.low_u32() * 8 + 7;
    let mask = (U256::one() << bit) - U256::one();
    if x.bit(bit as usize) {
        x | !mask
    } else {
        x & mask
    }
}

/// BYTE: byte `i` of `x`, counted from the most significant end
pub fn byte(i: U256, x: U256) -> U256 {
    if i >= U256::from(32) {
        return U256::zero();
    }
    U256::from(x.byte(31 - i.low_u32() as usize))
}

/// SHL
pub fn shl(shift: U256, value: U256) -> U256 {
    if shift >= U256::from(256) {
        return U256::zero();
    }
    value << shift.low_u32()
}

/// SHR (logical)
pub fn shr(shift: U256, value: U256) -> U256 {
    if shift >= U256::from(256) {
        return U256::zero();
    }
    value >> shift.low_u32()
}

/// SAR (arithmetic, sign preserving)
pub fn sar(shift: U256, value: U256) -> U256 {
    let negative = is_negative(&value);
    if shift >= U256::from(256) {
        return if negative { U256::MAX } else { U256::zero() };
    }
    let shift = shift.low_u32();
    let shifted = value >> shift;
    if negative && shift > 0 {
        shifted | (U256::MAX << (256 - shift))
    } else {
        shifted
    }
}

/// SLT
pub fn slt(a: &U256, b: &U256) -> bool {
    match (is_negative(a), is_negative(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => a < b,
    }
}

/// SGT
pub fn sgt(a: &U256, b: &U256) -> bool {
    slt(b, a)
}

/// Number of significant bytes in the word (EXP gas)
pub fn byte_len(value: &U256) -> u64 {
    (value.bits() as u64).div_ceil(8)
}
