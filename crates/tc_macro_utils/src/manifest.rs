use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a `tc_*` crate as seen from the
/// caller's Cargo.toml.
///
/// Derive macros must emit paths that resolve in the *invoking* crate, which
/// may depend on `tc_codec` directly or only on the `tycodec` facade.
///
/// # Example
///
/// ```rust
/// # use tc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("tc_codec"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the name starts with `tc_` and the caller depends on `tycodec`,
///    return `::tycodec::short_name` (e.g. `tc_codec` -> `::tycodec::codec`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to `::crate_name`.
///
/// A crate referencing itself relies on the fallback together with
/// `extern crate self as crate_name;` in its root.
#[derive(Debug)]
pub struct Manifest {
    manifest: Document<Box<str>>,
    modified_time: SystemTime,
}

const FACADE_NAME: &str = "tycodec";
const CRATE_PREFIX: &str = "tc_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn read(path: &Path, modified_time: SystemTime) -> Self {
        let source = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        let manifest = Document::parse(source)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));
        Self {
            manifest,
            modified_time,
        }
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(parse_path(&format!("::{name}")));
        }

        let short = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| parse_path(&format!("::{FACADE_NAME}::{short}")))
    }

    /// Return a [`syn::Path`] for the crate named `name` as resolved from the
    /// caller's Cargo.toml. See the type-level docs for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::lookup(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| parse_path(&format!("::{name}")))
    }

    /// Run `func` with the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Parsed manifests are cached per path and re-read when the file's
    /// modification time changes. Call this once per macro invocation and
    /// reuse the returned [`syn::Path`].
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .expect("The Cargo.toml should have a modified time.");

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Self::read(&path, modified_time);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

fn parse_path(path: &str) -> syn::Path {
    syn::parse_str(path).unwrap_or_else(|_| panic!("`{path}` is not a valid path"))
}
