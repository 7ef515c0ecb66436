//! Environment variable sentinels.
//!
//! [`env_var!`](crate::env_var) declares a type whose existence proves the variable was
//! read. Its name is derived from the type name, so `struct DeletionSecret;` reads
//! `DELETION_SECRET`. The value derefs to `str` and has no `Debug` impl, which keeps
//! secrets out of logs.

use thiserror::Error;

/// Failure to read a required environment variable.
#[derive(Debug, Error)]
#[error("An error occurred while reading envvar: {var_name}. Err: {err}")]
pub struct VarNameErr {
    pub var_name: &'static str,
    pub err: std::env::VarError,
}

pub fn read_env(var_name: &'static str) -> Result<String, VarNameErr> {
    std::env::var(var_name).map_err(|err| VarNameErr { var_name, err })
}

#[macro_export]
macro_rules! env_var {
    (
        $(#[$attr:meta])*
        $v:vis struct $n:ident;
    ) => {
        $crate::runtime::env::paste::paste! {
            #[doc = "Environment variable sentinel for `" $n "`."]
            $(#[$attr])*
            $v enum $n {
                #[doc = "Read from the environment at runtime"]
                Runtime(std::sync::Arc<str>),
                #[doc = "Provided in code, typically by tests"]
                Static(&'static str),
            }

            impl $n {
                pub const VAR_NAME: &'static str = stringify!([<$n:snake:upper>]);

                #[doc = "Reads the variable from the environment."]
                #[allow(dead_code)]
                $v fn new() -> Result<Self, $crate::runtime::env::VarNameErr> {
                    let value = $crate::runtime::env::read_env(Self::VAR_NAME)?;
                    Ok(Self::Runtime(std::sync::Arc::from(value)))
                }

                #[allow(dead_code)]
                $v const fn from_static(value: &'static str) -> Self {
                    Self::Static(value)
                }
            }

            impl std::ops::Deref for $n {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    match self {
                        Self::Runtime(value) => &**value,
                        Self::Static(value) => *value,
                    }
                }
            }

            impl std::convert::AsRef<str> for $n {
                fn as_ref(&self) -> &str {
                    self
                }
            }
        }
    };
}

pub use paste;
