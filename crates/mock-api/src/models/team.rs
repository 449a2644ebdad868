//! 团队成员模型

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownVariant;
use super::time::{millis, millis_option};
use crate::store::Record;

/// 商户后台的团队成员
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: TeamRole,
    pub status: MemberStatus,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    /// 新建成员尚未登录过
    #[serde(with = "millis_option")]
    pub last_login: Option<DateTime<Utc>>,
}

impl Record for TeamMember {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 成员角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamRole {
    Admin,
    Manager,
    Operator,
}

impl TeamRole {
    pub const ALL: [TeamRole; 3] = [Self::Admin, Self::Manager, Self::Operator];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Operator => "Operator",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 大小写不敏感
impl FromStr for TeamRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("team role", s))
    }
}

/// 成员状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Active, Self::Inactive]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("member status", s))
    }
}

/// 成员编号，6 位补零
pub fn member_id(seq: u64) -> String {
    format!("usr_{seq:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_serde() {
        assert_eq!("operator".parse::<TeamRole>().unwrap(), TeamRole::Operator);
        assert_eq!("ADMIN".parse::<TeamRole>().unwrap(), TeamRole::Admin);
        assert!("root".parse::<TeamRole>().is_err());
        assert_eq!(serde_json::to_string(&TeamRole::Manager).unwrap(), "\"Manager\"");
    }

    #[test]
    fn test_member_status_parse() {
        assert_eq!("inactive".parse::<MemberStatus>().unwrap(), MemberStatus::Inactive);
        assert!("gone".parse::<MemberStatus>().is_err());
    }

    #[test]
    fn test_last_login_null() {
        let member = TeamMember {
            id: member_id(100051),
            name: "Zeynep".to_string(),
            email: "zeynep@paymoredemo.com".to_string(),
            role: TeamRole::Operator,
            status: MemberStatus::Active,
            created_at: Utc::now(),
            last_login: None,
        };
        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(value["id"], "usr_100051");
        assert!(value["lastLogin"].is_null());
        assert_eq!(value["role"], "Operator");
    }

    #[test]
    fn test_member_id_padding() {
        assert_eq!(member_id(2), "usr_000002");
    }
}
