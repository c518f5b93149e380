use rand::Rng;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const DIGITS: &[u8] = b"0123456789";

/// Generates a random string of `length` characters drawn from `charset`.
fn random_from(charset: &[u8], length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

/// Random `[A-Za-z0-9]` string, used for bearer and password reset tokens.
pub fn alphanumeric(length: usize) -> String {
    random_from(ALPHANUMERIC, length)
}

/// Random numeric code, used for email verification tokens.
pub fn numeric(length: usize) -> String {
    random_from(DIGITS, length)
}

/// Payment reference of the form `rfb_` followed by 10 alphanumeric characters.
pub fn transaction_reference() -> String {
    format!("rfb_{}", alphanumeric(10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_reference_shape() {
        let reference = transaction_reference();

        assert_eq!(reference.len(), 14);
        assert!(reference.starts_with("rfb_"));
        assert!(reference[4..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generates_numeric_codes() {
        let code = numeric(6);

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn generates_distinct_tokens() {
        assert_ne!(alphanumeric(32), alphanumeric(32));
    }
}
