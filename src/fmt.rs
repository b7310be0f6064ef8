/// Format an amount as dollars with thousands separators: $1,234.56.
/// Expense amounts are non-negative by invariant.
pub fn money(val: f64) -> String {
    let cents = format!("{:.2}", val.max(0.0));
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((&cents, "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    format!("${with_commas}.{dec_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1000000.99), "$1,000,000.99");
        assert_eq!(money(45.75), "$45.75");
        assert_eq!(money(135.25), "$135.25");
    }
}
