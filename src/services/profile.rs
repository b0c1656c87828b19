use crate::domain::models::{UserAccount, UserSummary, Users};
use crate::services::policy::policy_deny;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(char::is_whitespace)
}

/// PAN format: five letters, four digits, one letter.
pub fn validate_pan(pan: &str) -> bool {
    let up = pan.to_ascii_uppercase();
    let chars: Vec<char> = up.chars().collect();
    chars.len() == 10
        && chars[..5].iter().all(|c| c.is_ascii_uppercase())
        && chars[5..9].iter().all(|c| c.is_ascii_digit())
        && chars[9].is_ascii_uppercase()
}

/// Keep the first three characters and the last one; mask the rest.
pub fn mask_pan(pan: &str) -> String {
    let up = pan.to_ascii_uppercase();
    if up.len() < 5 {
        return up;
    }
    let head: String = up.chars().take(3).collect();
    let tail = up.chars().last().unwrap_or('*');
    format!("{}****{}", head, tail)
}

pub fn summarize(account: &UserAccount) -> UserSummary {
    UserSummary {
        name: account.name.clone(),
        email: account.email.clone(),
        pan_masked: account.pan.as_deref().map(mask_pan),
    }
}

fn session_token(email: &str) -> String {
    let payload = format!("{}|{}", email, chrono::Utc::now().timestamp());
    format!("local.{}", STANDARD.encode(payload))
}

pub fn register(
    users: &mut Users,
    name: Option<&str>,
    email: &str,
    password: &str,
    pan: Option<&str>,
) -> anyhow::Result<UserAccount> {
    if !validate_email(email) {
        anyhow::bail!("enter a valid email");
    }
    if password.len() < 6 {
        anyhow::bail!("password should be at least 6 characters");
    }
    if let Some(p) = pan {
        if !validate_pan(p) {
            anyhow::bail!("invalid PAN format");
        }
    }
    if users.accounts.contains_key(email) {
        anyhow::bail!("account already exists: {}", email);
    }
    let name = name
        .map(|n| n.to_string())
        .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());
    let account = UserAccount {
        name,
        email: email.to_string(),
        password: password.to_string(),
        pan: pan.map(|p| p.to_ascii_uppercase()),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    users.accounts.insert(email.to_string(), account.clone());
    users.current = Some(email.to_string());
    users.token = Some(session_token(email));
    Ok(account)
}

pub fn login(users: &mut Users, email: &str, password: &str) -> anyhow::Result<UserAccount> {
    let account = users
        .accounts
        .get(email)
        .filter(|a| a.password == password)
        .cloned()
        .ok_or_else(|| policy_deny("invalid credentials"))?;
    users.current = Some(email.to_string());
    users.token = Some(session_token(email));
    Ok(account)
}

pub fn logout(users: &mut Users) {
    users.current = None;
    users.token = None;
}

pub fn current_account(users: &Users) -> Option<&UserAccount> {
    users
        .current
        .as_deref()
        .and_then(|email| users.accounts.get(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(validate_email("asha@example.com"));
        assert!(!validate_email("asha"));
        assert!(!validate_email("asha@nodot"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("a b@example.com"));
    }

    #[test]
    fn pan_validation_matches_format() {
        assert!(validate_pan("ABCDE1234F"));
        assert!(validate_pan("abcde1234f"));
        assert!(!validate_pan("ABCDE12345"));
        assert!(!validate_pan("AB1234567F"));
        assert!(!validate_pan("ABCDE1234"));
    }

    #[test]
    fn pan_masking_keeps_head_and_tail() {
        assert_eq!(mask_pan("ABCDE1234F"), "ABC****F");
        assert_eq!(mask_pan("ab"), "AB");
    }

    #[test]
    fn register_then_login_cycle() {
        let mut users = Users::default();
        let account =
            register(&mut users, None, "asha@example.com", "secret1", Some("abcde1234f"))
                .expect("register");
        assert_eq!(account.name, "asha");
        assert_eq!(account.pan.as_deref(), Some("ABCDE1234F"));
        assert!(users.token.as_deref().unwrap_or("").starts_with("local."));

        logout(&mut users);
        assert!(current_account(&users).is_none());

        login(&mut users, "asha@example.com", "secret1").expect("login");
        assert_eq!(current_account(&users).unwrap().email, "asha@example.com");
        assert!(login(&mut users, "asha@example.com", "wrong").is_err());
    }

    #[test]
    fn register_rejects_duplicates_and_short_passwords() {
        let mut users = Users::default();
        register(&mut users, None, "a@b.co", "secret1", None).expect("first register");
        assert!(register(&mut users, None, "a@b.co", "secret2", None).is_err());
        assert!(register(&mut users, None, "c@d.co", "nope", None).is_err());
    }
}
