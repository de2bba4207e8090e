use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PortalError, Result};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Student,    // 学生
    Instructor, // 讲师
    Admin,      // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const INSTRUCTOR: &'static str = "instructor";
    pub const ADMIN: &'static str = "admin";

    /// 可以点名、评分、管理课程内容的角色
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Instructor, &Self::Admin]
    }

    pub fn is_staff(&self) -> bool {
        Self::staff_roles().contains(&self)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, instructor, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Instructor => write!(f, "{}", UserRole::INSTRUCTOR),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::INSTRUCTOR => Ok(UserRole::Instructor),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

/// 名册中的学生（规范形态）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct RosterStudent {
    pub student_id: i64,
    pub name: String,
    pub email: String,
}

/// 名册接口返回的原始行，不同接口对学生 ID/姓名使用的字段名不同
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterEntryWire {
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl RosterEntryWire {
    /// 在边界上规范化为 `RosterStudent`
    ///
    /// 联表返回的行会同时带报名记录的 `id` 和学生的 `student_id`，此时以
    /// `student_id` 为准。两者都缺失或姓名字段冲突时直接报错。
    pub fn normalize(self) -> Result<RosterStudent> {
        let student_id = match (self.student_id, self.id) {
            (Some(a), _) => a,
            (None, Some(b)) => b,
            (None, None) => {
                return Err(PortalError::shape_mismatch("名册行缺少 student_id"));
            }
        };

        let name = match (self.student_name, self.name) {
            (Some(a), Some(b)) if a != b => {
                return Err(PortalError::shape_mismatch(format!(
                    "学生 {student_id} 的 student_name 与 name 不一致"
                )));
            }
            (Some(a), _) => a,
            (None, Some(b)) => b,
            (None, None) => {
                return Err(PortalError::shape_mismatch(format!(
                    "学生 {student_id} 缺少姓名字段"
                )));
            }
        };

        Ok(RosterStudent {
            student_id,
            name,
            email: self.email.unwrap_or_default(),
        })
    }
}

/// 批量规范化名册
pub fn normalize_roster(rows: Vec<RosterEntryWire>) -> Result<Vec<RosterStudent>> {
    rows.into_iter().map(RosterEntryWire::normalize).collect()
}
