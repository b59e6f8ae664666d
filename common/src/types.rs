//! 抽出結果と出力フィールドの型定義
//!
//! - ExtractionResult: 抽出サービスが返すキー/値のマップ
//! - OutputFields: 画面に表示する4つのフィールド

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// サービスが自身の失敗を報告するときのキー
pub const SERVICE_ERROR_KEY: &str = "error";

/// 表示対象として認識するキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizedField {
    FirstName,
    LastName,
    Major,
    Gpa,
}

/// レスポンスキーとフィールドの対応表（表示順）
pub const RECOGNIZED_FIELDS: &[RecognizedField] = &[
    RecognizedField::FirstName,
    RecognizedField::LastName,
    RecognizedField::Major,
    RecognizedField::Gpa,
];

impl RecognizedField {
    /// サービスのレスポンスキー（大文字小文字を区別して完全一致）
    pub fn key(&self) -> &'static str {
        match self {
            RecognizedField::FirstName => "STUDENT_FIRST_NAME",
            RecognizedField::LastName => "STUDENT_LAST_NAME",
            RecognizedField::Major => "MAJOR",
            RecognizedField::Gpa => "GPA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecognizedField::FirstName => "First Name",
            RecognizedField::LastName => "Last Name",
            RecognizedField::Major => "Major",
            RecognizedField::Gpa => "GPA",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        RECOGNIZED_FIELDS.iter().copied().find(|f| f.key() == key)
    }
}

/// 抽出サービスのレスポンス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    values: HashMap<String, String>,
}

impl ExtractionResult {
    /// レスポンス本文をパースする
    ///
    /// 本文は値がすべて文字列のJSONオブジェクトでなければならない。
    /// 配列やネストした値、null はエラー。
    pub fn from_json(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(Error::Parse(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let mut values = HashMap::with_capacity(map.len());
        for (key, value) in map {
            match value {
                serde_json::Value::String(s) => {
                    values.insert(key, s);
                }
                other => {
                    return Err(Error::Parse(format!(
                        "value for \"{}\" must be a string, got {}",
                        key,
                        json_kind(&other)
                    )));
                }
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// サービスが `{"error": "..."}` で失敗を返した場合のメッセージ
    pub fn service_error(&self) -> Option<&str> {
        self.get(SERVICE_ERROR_KEY)
    }

    /// 認識対象外のキー（ソート済み）
    pub fn unrecognized_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|k| RecognizedField::from_key(k).is_none())
            .collect();
        keys.sort_unstable();
        keys
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtractionResult {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// 画面に表示する4つの出力フィールド
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub major: Option<String>,
    pub gpa: Option<String>,
}

impl OutputFields {
    /// 全フィールドを空にする
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// 全フィールドを空にしてから、認識できるキーだけを反映する
    pub fn populate(&mut self, result: &ExtractionResult) {
        self.clear();
        for field in RECOGNIZED_FIELDS {
            if let Some(value) = result.get(field.key()) {
                *self.slot_mut(*field) = Some(value.to_string());
            }
        }
    }

    pub fn from_extraction(result: &ExtractionResult) -> Self {
        let mut fields = Self::default();
        fields.populate(result);
        fields
    }

    pub fn get(&self, field: RecognizedField) -> Option<&str> {
        match field {
            RecognizedField::FirstName => self.first_name.as_deref(),
            RecognizedField::LastName => self.last_name.as_deref(),
            RecognizedField::Major => self.major.as_deref(),
            RecognizedField::Gpa => self.gpa.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: RecognizedField) -> &mut Option<String> {
        match field {
            RecognizedField::FirstName => &mut self.first_name,
            RecognizedField::LastName => &mut self.last_name,
            RecognizedField::Major => &mut self.major,
            RecognizedField::Gpa => &mut self.gpa,
        }
    }

    pub fn is_empty(&self) -> bool {
        RECOGNIZED_FIELDS.iter().all(|f| self.get(*f).is_none())
    }

    /// 値が入っているフィールドを (キー, 値) で返す
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        RECOGNIZED_FIELDS
            .iter()
            .filter_map(|f| self.get(*f).map(|v| (f.key(), v)))
            .collect()
    }
}
