pub mod format;

use std::{path::Path, fs::File, io::{Write, BufReader}};

use anyhow::{Context, ensure};
use proc_macro2::{Literal, TokenStream};
use quote::{quote, ToTokens, TokenStreamExt};
use serde::{Serialize, Deserialize};
use schemars::{JsonSchema, schema_for, schema::RootSchema};

/// Matrix keypad configuration
#[derive(Serialize, Deserialize, JsonSchema, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeypadConfig {
    /// Number of matrix rows (driven pins)
    pub rows: u8,
    /// Number of matrix columns (sensed pins)
    pub columns: u8,
    /// Whether each key has a diode, so rows can be driven all the time
    #[serde(default)]
    pub has_diodes: bool,
    /// Time in milliseconds that a key must be stable to be reported as pressed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Character for each key in row-major order, empty to report only positions
    #[serde(default)]
    pub keys: String,
}

fn default_debounce_ms() -> u32 {
    1
}

impl ToTokens for KeypadConfig {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let has_diodes = &self.has_diodes;
        let debounce_ms = &self.debounce_ms;
        let keys = Literal::byte_string(self.keys.as_bytes());
        tokens.append_all(quote! {
            crate::keypad::KeypadConfig {
                has_diodes: #has_diodes,
                debounce_ms: #debounce_ms,
                keys: crate::keypad::KeyMap::new(#keys),
            }
        })
    }
}

impl KeypadConfig {
    /// Check that the configuration describes a usable keypad
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.rows > 0, "Keypad needs at least one row");
        ensure!(self.columns > 0, "Keypad needs at least one column");
        ensure!(self.keys.is_ascii(), "Keys must be ASCII characters: {:?}", self.keys);
        let n_keys = self.rows as usize * self.columns as usize;
        ensure!(self.keys.is_empty() || self.keys.len() == n_keys,
            "Number of keys ({}) does not match {}x{} matrix",
            self.keys.len(), self.rows, self.columns);
        Ok(())
    }

    fn file_tokens(&self) -> TokenStream {
        let nrows = self.rows as usize;
        let ncols = self.columns as usize;
        quote! {
            pub const NROWS: usize = #nrows;
            pub const NCOLS: usize = #ncols;
            pub static CONFIG: crate::keypad::KeypadConfig<'static> = #self;
        }
    }

    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        self.validate()?;
        let mut file = File::create(path)?;
        let code = format::format_file(self.file_tokens())?;
        file.write_all(code.as_bytes())?;
        Ok(())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .context(format!("Could not open {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(&mut reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn schema() -> RootSchema {
        schema_for!(Self)
    }

    pub fn schema_to_file(path: &Path) -> anyhow::Result<()> {
        let mut file = File::create(path)?;
        let schema = Self::schema();
        let string = serde_json::to_string_pretty(&schema)?;
        file.write_all(string.as_bytes())?;
        Ok(())
    }
}
