//! プリセットの可視性ルール
//!
//! メールアドレスとプロジェクトの両方の条件を満たした場合にのみ可視:
//!
//! - `required_emails` が空なら全員が対象。それ以外はいずれか1件に一致すればよい。
//!   `@` を含むエントリはアドレスと完全一致、含まないエントリはドメインとして
//!   `@<entry>` で終わるアドレスに一致する。
//! - `projects` が空なら全プロジェクト（プロジェクトなしも含む）が対象。
//!   それ以外は指定プロジェクトが含まれている必要がある。空のプロジェクトIDは
//!   プロジェクトなしとして扱う。

use crate::model::Preset;

/// `email` のユーザーが `project_id` 内で `preset` を利用できるか
pub fn is_preset_visible(preset: &Preset, email: &str, project_id: Option<&str>) -> bool {
    email_allowed(&preset.spec.required_emails, email)
        && project_allowed(&preset.spec.projects, project_id)
}

/// 可視なプリセットのみを順序を保って残す
pub fn filter_visible(presets: Vec<Preset>, email: &str, project_id: Option<&str>) -> Vec<Preset> {
    presets
        .into_iter()
        .filter(|preset| is_preset_visible(preset, email, project_id))
        .collect()
}

fn email_allowed(required: &[String], email: &str) -> bool {
    if required.is_empty() {
        return true;
    }

    let domain = match email.split_once('@') {
        Some((_, domain)) if !domain.contains('@') => Some(domain),
        _ => None,
    };

    required.iter().any(|entry| {
        if entry.contains('@') {
            entry == email
        } else {
            domain == Some(entry.as_str())
        }
    })
}

fn project_allowed(projects: &[String], project_id: Option<&str>) -> bool {
    if projects.is_empty() {
        return true;
    }

    match project_id.filter(|id| !id.is_empty()) {
        Some(id) => projects.iter().any(|p| p == id),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(emails: &[&str], projects: &[&str]) -> Preset {
        Preset::new("p")
            .with_required_emails(emails.iter().copied())
            .with_projects(projects.iter().copied())
    }

    #[test]
    fn test_generic_preset_is_visible_everywhere() {
        let p = preset(&[], &[]);
        assert!(is_preset_visible(&p, "a@example.com", None));
        assert!(is_preset_visible(&p, "b@other.org", Some("proj-a")));
        assert!(is_preset_visible(&p, "", Some("")));
    }

    #[test]
    fn test_domain_entry() {
        let p = preset(&["example.com"], &[]);
        assert!(is_preset_visible(&p, "a@example.com", None));
        assert!(!is_preset_visible(&p, "a@other.com", None));
        assert!(!is_preset_visible(&p, "a@sub.example.com.evil", None));
    }

    #[test]
    fn test_bare_tld_does_not_match_whole_domain() {
        let p = preset(&["com"], &[]);
        assert!(!is_preset_visible(&p, "test@example.com", None));
    }

    #[test]
    fn test_partial_domain_does_not_match() {
        let p = preset(&["example"], &[]);
        assert!(!is_preset_visible(&p, "test@example.com", None));
    }

    #[test]
    fn test_mixed_entries_use_or_semantics() {
        let p = preset(&["test@example.com", "pleaseno.org"], &[]);
        assert!(is_preset_visible(&p, "test@example.com", None));
        assert!(is_preset_visible(&p, "anyone@pleaseno.org", None));
        assert!(!is_preset_visible(&p, "foo@bar.com", None));
        assert!(!is_preset_visible(&p, "other@example.com", None));
    }

    #[test]
    fn test_address_entry_is_case_sensitive() {
        let p = preset(&["Test@example.com"], &[]);
        assert!(!is_preset_visible(&p, "test@example.com", None));
    }

    #[test]
    fn test_malformed_email_matches_no_domain() {
        let p = preset(&["example.com"], &[]);
        assert!(!is_preset_visible(&p, "example.com", None));
        assert!(!is_preset_visible(&p, "a@b@example.com", None));
    }

    #[test]
    fn test_project_scope() {
        let p = preset(&[], &["proj-A"]);
        assert!(is_preset_visible(&p, "a@example.com", Some("proj-A")));
        assert!(!is_preset_visible(&p, "a@example.com", Some("proj-B")));
        assert!(!is_preset_visible(&p, "a@example.com", Some("")));
        assert!(!is_preset_visible(&p, "a@example.com", None));
    }

    #[test]
    fn test_both_checks_must_pass() {
        let p = preset(&["example.com"], &["proj-A"]);
        assert!(is_preset_visible(&p, "a@example.com", Some("proj-A")));
        assert!(!is_preset_visible(&p, "a@other.com", Some("proj-A")));
        assert!(!is_preset_visible(&p, "a@example.com", Some("proj-B")));
    }

    #[test]
    fn test_filter_visible_keeps_order() {
        let presets = vec![
            Preset::new("test-1"),
            Preset::new("test-2").with_required_emails(["test.com"]),
            Preset::new("test-3").with_required_emails(["example.com"]),
        ];

        let names: Vec<_> = filter_visible(presets, "test@example.com", None)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["test-1", "test-3"]);
    }
}
