//! Rendering of resources into YAML documents.
use std::io::Write;

use snafu::{ResultExt, Snafu};
use tracing::instrument;

type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents every error which can be encountered during YAML serialization.
#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize YAML"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to write YAML document separator"))]
    WriteDocumentSeparator { source: std::io::Error },

    #[snafu(display("failed to write trailing newline"))]
    WriteTrailingNewline { source: std::io::Error },

    #[snafu(display("failed to write YAML to stdout"))]
    WriteToStdout { source: std::io::Error },

    #[snafu(display("failed to parse bytes as valid UTF-8 string"))]
    ParseUtf8Bytes { source: std::string::FromUtf8Error },
}

/// Provides configurable options during YAML serialization.
///
/// The default produces a complete document: a leading `---` line, the body and a trailing blank
/// line, so that several rendered resources can be concatenated into one stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Adds leading triple dashes (`---`) to the output string.
    pub explicit_document: bool,

    /// Serialize enum variants as YAML maps using the variant name as the key.
    pub singleton_map: bool,

    /// Appends an empty line after the document body.
    pub trailing_newline: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            explicit_document: true,
            singleton_map: true,
            trailing_newline: true,
        }
    }
}

/// Serializes the given data structure and writes it to a [`Writer`](Write).
pub fn serialize<T, W>(value: &T, mut writer: W, options: SerializeOptions) -> Result<()>
where
    T: serde::Serialize + ?Sized,
    W: Write,
{
    if options.explicit_document {
        writer
            .write_all(b"---\n")
            .context(WriteDocumentSeparatorSnafu)?;
    }

    let mut serializer = serde_yaml::Serializer::new(&mut writer);

    if options.singleton_map {
        serde_yaml::with::singleton_map_recursive::serialize(&value, &mut serializer)
            .context(SerializeYamlSnafu)?;
    } else {
        value
            .serialize(&mut serializer)
            .context(SerializeYamlSnafu)?;
    }

    // Flushes the emitter before anything else is written
    serializer.into_inner().context(SerializeYamlSnafu)?;

    if options.trailing_newline {
        writer.write_all(b"\n").context(WriteTrailingNewlineSnafu)?;
    }

    Ok(())
}

/// Renders `value` as a YAML document using the default [`SerializeOptions`].
#[instrument(skip_all)]
pub fn to_yaml<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    serialize(value, &mut buffer, SerializeOptions::default())?;

    String::from_utf8(buffer).context(ParseUtf8BytesSnafu)
}

/// Renders any [serializable](serde::Serialize) type as YAML.
pub trait ToYaml: serde::Serialize {
    /// Renders `self` as a YAML document using the default [`SerializeOptions`].
    fn to_yaml(&self) -> Result<String> {
        to_yaml(self)
    }

    /// Renders `self` and prints the document to stdout.
    fn print_yaml(&self) -> Result<()> {
        let document = self.to_yaml()?;

        let mut writer = std::io::stdout().lock();
        writer
            .write_all(document.as_bytes())
            .context(WriteToStdoutSnafu)
    }
}

impl<T> ToYaml for T where T: serde::Serialize {}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rstest::rstest;

    use super::*;
    use crate::builder::{
        namespace::{self, Namespace},
        secret::{self, Secret},
    };

    #[rstest]
    fn render_namespace() {
        let namespace = Namespace::new("test", [
            namespace::label("team", "platform"),
            namespace::annotation("hey", "there"),
        ]);

        let expected = indoc! {"
            ---
            apiVersion: v1
            kind: Namespace
            metadata:
              annotations:
                hey: there
              labels:
                team: platform
              name: test

        "};

        assert_eq!(namespace.to_yaml().unwrap(), expected);
    }

    #[rstest]
    fn binary_data_is_base64_encoded() {
        let secret = Secret::new("creds", [secret::data("password", "hunter2")]);

        let expected = indoc! {"
            ---
            apiVersion: v1
            kind: Secret
            data:
              password: aHVudGVyMg==
            metadata:
              annotations: {}
              labels: {}
              name: creds

        "};

        assert_eq!(secret.to_yaml().unwrap(), expected);
    }

    #[rstest]
    fn render_unsized_slice() {
        let hosts: &[&str] = &["a.example.com", "b.example.com"];

        assert_eq!(
            to_yaml(hosts).unwrap(),
            "---\n- a.example.com\n- b.example.com\n\n"
        );
    }

    #[rstest]
    #[case::defaults(SerializeOptions::default(), "---\nname: test\n\n")]
    #[case::bare(
        SerializeOptions { explicit_document: false, singleton_map: false, trailing_newline: false },
        "name: test\n"
    )]
    fn serialize_options(#[case] options: SerializeOptions, #[case] expected: &str) {
        let value = std::collections::BTreeMap::from([("name", "test")]);
        let mut buffer = Vec::new();
        serialize(&value, &mut buffer, options).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }
}
