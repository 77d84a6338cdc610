use std::{
    fmt::Debug,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

pub fn read_json<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| serde_json::from_reader(BufReader::new(File::open(&path)?)).map_err(anyhow::Error::new))()
        .with_context(|| {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        })
}

/// Writes `value` as indented JSON, truncating any existing file.
///
/// Non-ASCII characters are written as they are, not as `\u` escapes.
pub fn write_json_pretty<P: Into<PathBuf>, T: Serialize + ?Sized>(
    path: P,
    value: &T,
    indent: &[u8],
) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(indent));
    value.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}
