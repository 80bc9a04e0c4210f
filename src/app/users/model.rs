//! 用户数据模型与请求体校验

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// 姓名最大字符数，与 `UserPayload` 上的 length 规则一致
pub const NAME_MAX_CHARS: usize = 20;

/// 已存储的用户记录，`id` 由服务端分配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

/// POST / PUT 请求体
///
/// 所有字段都允许缺失，缺失与越界统一由校验规则报告。
/// 客户端传入的 `id` 会被忽略。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserPayload {
    pub id: Option<i64>,

    #[validate(
        required(message = "姓名不能为空"),
        length(max = 20, message = "姓名长度不能超过 20 个字符"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "年龄不能为空"),
        range(min = 0, max = 120, message = "年龄必须在 0 到 120 之间")
    )]
    pub age: Option<i32>,
}

/// 通过校验的用户字段，交给存储层写入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
}

impl NewUser {
    pub fn with_id(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

impl UserPayload {
    /// 校验请求体并转换为 [`NewUser`]
    pub fn into_new_user(self) -> Result<NewUser, ValidationErrors> {
        self.validate()?;

        Ok(NewUser {
            name: self.name.expect("required 校验保证 name 存在"),
            age: self.age.expect("required 校验保证 age 存在"),
        })
    }
}

fn not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::from("姓名不能为空"));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, age: Option<i32>) -> UserPayload {
        UserPayload {
            id: None,
            name: name.map(str::to_string),
            age,
        }
    }

    fn failed_fields(payload: &UserPayload) -> Vec<String> {
        let errors = payload.validate().unwrap_err();
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        fields
    }

    #[test]
    fn test_valid_payload() {
        let user = payload(Some("Alice"), Some(20)).into_new_user().unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.age, 20);
    }

    #[test]
    fn test_empty_payload_reports_both_fields() {
        assert_eq!(failed_fields(&UserPayload::default()), vec!["age", "name"]);
    }

    #[test]
    fn test_blank_names() {
        assert_eq!(failed_fields(&payload(Some(""), Some(30))), vec!["name"]);
        assert_eq!(failed_fields(&payload(Some("   \t"), Some(30))), vec!["name"]);
    }

    #[test]
    fn test_name_length_counts_characters() {
        let twenty = "a".repeat(NAME_MAX_CHARS);
        assert!(payload(Some(&twenty), Some(1)).validate().is_ok());

        let twenty_one = "a".repeat(NAME_MAX_CHARS + 1);
        assert_eq!(failed_fields(&payload(Some(&twenty_one), Some(1))), vec!["name"]);

        // 多字节字符按字符计数
        let chinese = "张".repeat(NAME_MAX_CHARS);
        assert!(payload(Some(&chinese), Some(1)).validate().is_ok());
    }

    #[test]
    fn test_age_bounds() {
        assert!(payload(Some("Bob"), Some(0)).validate().is_ok());
        assert!(payload(Some("Bob"), Some(120)).validate().is_ok());
        assert_eq!(failed_fields(&payload(Some("Bob"), Some(-1))), vec!["age"]);
        assert_eq!(failed_fields(&payload(Some("Bob"), Some(150))), vec!["age"]);
        assert_eq!(failed_fields(&payload(Some("Bob"), None)), vec!["age"]);
    }

    #[test]
    fn test_rule_messages() {
        let errors = payload(Some(" "), Some(121)).validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["name"][0].code, "blank");
        assert_eq!(fields["name"][0].message.as_deref(), Some("姓名不能为空"));
        assert_eq!(fields["age"][0].code, "range");
        assert_eq!(fields["age"][0].message.as_deref(), Some("年龄必须在 0 到 120 之间"));
    }

    #[test]
    fn test_invalid_payload_never_converts() {
        let errors = payload(None, Some(20)).into_new_user().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let errors = payload(Some("Alice"), None).into_new_user().unwrap_err();
        assert!(errors.field_errors().contains_key("age"));
    }

    #[test]
    fn test_client_id_is_ignored() {
        let mut input = payload(Some("Eve"), Some(33));
        input.id = Some(99);
        let user = input.into_new_user().unwrap().with_id(7);
        assert_eq!(user.id, 7);
    }
}
