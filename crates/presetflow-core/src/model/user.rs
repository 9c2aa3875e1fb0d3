use serde::{Deserialize, Serialize};

/// 呼び出し元ユーザー
///
/// `is_admin` でもプリセットの可視範囲は広がらない
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,

    #[serde(default)]
    pub is_admin: bool,
}

impl UserInfo {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_admin: false,
        }
    }

    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_admin: true,
        }
    }
}
