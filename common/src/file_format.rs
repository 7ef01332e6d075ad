use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum FileExtensionError {
    #[error("Failed to get file extension")]
    MissingFileExtension,
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
}

pub type FileFormatResult<T> = Result<T, FileExtensionError>;

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn get_file_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|os_str| os_str.to_str())
}

/// Text formats accepted for settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerdeFormat {
    Yaml,
    Json,
}

impl SerdeFormat {
    pub fn from_path(path: &Path) -> FileFormatResult<Self> {
        let ext = get_file_extension(path).ok_or(FileExtensionError::MissingFileExtension)?;

        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(FileExtensionError::UnsupportedFileExtension(
                path.display().to_string(),
            ))
        }
    }

    pub fn serialize<T: Serialize>(self, value: &T) -> SerdeFormatResult<String> {
        match self {
            Self::Yaml => Ok(serde_yml::to_string(value)?),
            Self::Json => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    pub fn deserialize<T: DeserializeOwned>(self, serialized: &str) -> SerdeFormatResult<T> {
        match self {
            Self::Yaml => Ok(serde_yml::from_str(serialized)?),
            Self::Json => Ok(serde_json::from_str(serialized)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        radius: usize,
        weight: f32,
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            SerdeFormat::from_path(Path::new("a/b.yaml")).unwrap(),
            SerdeFormat::Yaml
        );
        assert_eq!(
            SerdeFormat::from_path(Path::new("b.YML")).unwrap(),
            SerdeFormat::Yaml
        );
        assert_eq!(
            SerdeFormat::from_path(Path::new("b.json")).unwrap(),
            SerdeFormat::Json
        );
    }

    #[test]
    fn test_from_path_errors() {
        assert!(matches!(
            SerdeFormat::from_path(Path::new("settings")),
            Err(FileExtensionError::MissingFileExtension)
        ));
        let err = SerdeFormat::from_path(Path::new("settings.toml")).unwrap_err();
        assert!(err.to_string().contains("settings.toml"));
    }

    #[test]
    fn test_serialize_then_deserialize() {
        let value = Sample {
            radius: 7,
            weight: 0.5,
        };
        for format in [SerdeFormat::Yaml, SerdeFormat::Json] {
            let text = format.serialize(&value).unwrap();
            let parsed: Sample = format.deserialize(&text).unwrap();
            assert_eq!(parsed, value, "{:?}", format);
        }
    }

    #[test]
    fn test_deserialize_error() {
        let result: SerdeFormatResult<Sample> = SerdeFormat::Json.deserialize("{ radius: }");
        assert!(matches!(result, Err(SerdeFormatError::Json(_))));
    }
}
