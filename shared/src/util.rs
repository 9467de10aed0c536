use rust_decimal::{Decimal, RoundingStrategy};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
///
/// Callers that need strict uniqueness per instant (orders, sales) run the
/// result through [`next_unique_id`].
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Fresh snowflake id strictly greater than `last`.
///
/// Two ids taken in the same millisecond can collide in the random bits, so the
/// last issued id is remembered by the owner and bumped when needed.
pub fn next_unique_id(last: &mut i64) -> i64 {
    let candidate = snowflake_id();
    let id = if candidate > *last { candidate } else { *last + 1 };
    *last = id;
    id
}

/// Lenient integer parse with `parseInt` semantics.
///
/// Leading whitespace and an optional sign are accepted, then as many digits as
/// are present; anything after the digits is ignored. `"12abc"` → 12,
/// `" -3"` → -3, `"4.9"` → 4, `"abc"` / `""` → `None`. Values past the i64
/// range saturate at `i64::MAX` / `i64::MIN`.
pub fn parse_int_lenient(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut seen = false;
    let mut value: i64 = 0;
    for d in digits {
        seen = true;
        let d = i64::from(d - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(d) } else { v.checked_add(d) })
            .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    }
    seen.then_some(value)
}

/// Format an amount the way es-AR receipts print pesos: `$ 1.500,00`.
///
/// Two decimals, half away from zero, `.` for thousands and `,` for decimals,
/// non-breaking space after the symbol.
pub fn format_ars(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!(
        "{}$\u{a0}{},{}",
        if negative { "-" } else { "" },
        grouped,
        frac_part
    )
}
