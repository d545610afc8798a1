//! Critical-section classification
//!
//! A section is critical when its title or body mentions safety, emergency,
//! house rules, security and access, contacts, or check-in/check-out policy. Critical sections get
//! a retrieval boost and are highlighted when shown to guests.

/// Keywords that mark a section as critical (matched case-insensitively)
pub const CRITICAL_KEYWORDS: &[&str] = &[
    // Safety and emergencies
    "safety",
    "emergency",
    "fire",
    "evacuation",
    "first aid",
    "poison",
    "gas leak",
    "911",
    "police",
    "hospital",
    "medical",
    // House rules
    "rules",
    "house rules",
    "prohibited",
    "not allowed",
    "forbidden",
    "warning",
    "caution",
    "important",
    "must",
    "required",
    // Check-in / check-out policy
    "checkout",
    "check-out",
    "check out",
    "checkin",
    "check-in",
    "check in",
    "late checkout",
    "early checkin",
    // Security and access
    "security",
    "alarm",
    "code",
    "lock",
    "key",
    "lockbox",
    "keypad",
    // Contacts
    "contact",
    "host contact",
    "emergency contact",
];

/// Check whether a section's title or content contains a critical keyword
pub fn is_critical_text(title: &str, content: &str) -> bool {
    let title = title.to_lowercase();
    let content = content.to_lowercase();

    CRITICAL_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword) || content.contains(keyword))
}

/// Return every critical keyword found in the title or content
pub fn matched_keywords(title: &str, content: &str) -> Vec<&'static str> {
    let haystack = format!("{}\n{}", title.to_lowercase(), content.to_lowercase());

    CRITICAL_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| haystack.contains(keyword))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_title_is_critical() {
        assert!(is_critical_text("Emergency Contacts", "Call 911"));
    }

    #[test]
    fn test_keyword_in_content_is_critical() {
        assert!(is_critical_text("Arrival", "The LOCKBOX is by the front door."));
        assert!(is_critical_text("", "Checkout is at 11am."));
    }

    #[test]
    fn test_plain_section_is_not_critical() {
        assert!(!is_critical_text("Kitchen", "The coffee maker is next to the sink."));
    }

    #[test]
    fn test_access_sections_are_critical() {
        assert!(is_critical_text("Keys and Locks", "Spare set in the drawer."));
        assert!(is_critical_text("Wifi", "The wifi code is 1234."));
        assert!(is_critical_text("Arrival", "The key is in the lock box."));
        assert!(is_critical_text("Doctors", "Dial 911 for an ambulance."));
    }

    #[test]
    fn test_rules_sections_are_critical() {
        assert!(is_critical_text("Pool", "Glass is not allowed on the deck."));
        assert!(is_critical_text("Parties", "Events are prohibited."));
        assert!(is_critical_text("Gas", "If you smell a gas leak, open the windows."));
    }

    #[test]
    fn test_matched_keywords() {
        let matches = matched_keywords("Safety", "Fire extinguisher under the sink");
        assert!(matches.contains(&"safety"));
        assert!(matches.contains(&"fire"));
        assert!(!matches.contains(&"alarm"));
    }
}
