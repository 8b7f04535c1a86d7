//! Runtime-loaded shared libraries

use libloading::{Library, Symbol};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Dynamic library errors
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    /// The library could not be loaded
    #[error("Failed to load dynamic library {path}: {source}")]
    Load {
        /// Path or name that was loaded
        path: PathBuf,
        /// Loader error
        source: libloading::Error,
    },

    /// The library has no such symbol
    #[error("Symbol {name} not found: {source}")]
    Symbol {
        /// Requested symbol
        name: String,
        /// Loader error
        source: libloading::Error,
    },
}

/// A shared library held open until unloaded or dropped
#[derive(Debug)]
pub struct DynamicLibrary {
    path: PathBuf,
    library: Library,
}

impl DynamicLibrary {
    /// Load the library at `path`, or by name through the system search path
    ///
    /// # Safety
    /// Loading runs the library's initialisers, which may do anything.
    pub unsafe fn load(path: impl AsRef<OsStr>) -> Result<Self, LibraryError> {
        let path = PathBuf::from(path.as_ref());
        let library = Library::new(path.as_os_str()).map_err(|source| {
            log::error!("Failed to load dynamic library {}: {}", path.display(), source);
            LibraryError::Load { path: path.clone(), source }
        })?;

        log::debug!("Loaded dynamic library {}", path.display());
        Ok(Self { path, library })
    }

    /// Path or name the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an exported function
    ///
    /// # Safety
    /// `T` must match the symbol's actual signature.
    pub unsafe fn function<T>(&self, name: &str) -> Result<Symbol<'_, T>, LibraryError> {
        self.library.get(name.as_bytes()).map_err(|source| LibraryError::Symbol {
            name: name.to_string(),
            source,
        })
    }

    /// Unload the library, reporting failures the drop path would swallow
    pub fn unload(self) -> Result<(), LibraryError> {
        let path = self.path;
        self.library.close().map_err(|source| {
            log::warn!("Failed to unload dynamic library {}: {}", path.display(), source);
            LibraryError::Load { path, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_library_fails_to_load() {
        let result = unsafe { DynamicLibrary::load("/does/not/exist/libgame.so") };
        assert!(matches!(result, Err(LibraryError::Load { .. })));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_function_lookup_and_unload() {
        type Strlen = unsafe extern "C" fn(*const std::ffi::c_char) -> usize;

        let library = unsafe { DynamicLibrary::load("libc.so.6") }.unwrap();
        {
            let strlen = unsafe { library.function::<Strlen>("strlen") }.unwrap();
            assert_eq!(unsafe { strlen(c"vulkan".as_ptr()) }, 6);

            let missing = unsafe { library.function::<Strlen>("yggdrasil_no_such_symbol") };
            assert!(matches!(missing, Err(LibraryError::Symbol { .. })));
        }

        library.unload().unwrap();
    }
}
