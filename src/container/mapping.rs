//! Generated C++ tag mapping headers.
//!
//! Each description file `menu.rsrc` produces three headers next to it:
//!
//! - `menuResources.h`: tags of statically loaded entries
//! - `menuResourcesDynamic.h`: tags of on-demand entries
//! - `menuResourcesDynamicValues.h`: the bare on-demand hash values

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, RsrcError};
use crate::types::{LoadTiming, ResourceEntry};

const INDENT: &str = "  ";
const TAG_TYPE: &str = "uint64_t";
const GENERATED_NOTE: &str = "/* Generated by rsrc from the matching .rsrc file. Do not edit. */\n\n";

/// Names and destinations derived from a description file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingNames {
    pub namespace: String,
    pub guard: String,
    /// Destination without the `.h` suffix, e.g. `<dir>/menuResources`.
    pub dest_base: PathBuf,
}

impl MappingNames {
    /// Derive names for `rsrc_file`, which must live under `root`.
    pub fn for_description(root: &Path, rsrc_file: &Path) -> Result<Self> {
        // name up to the first '.', so `menu.ui.rsrc` maps to `menu`
        let stem = rsrc_file
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .and_then(|name| name.split('.').next().map(str::to_string))
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| RsrcError::Io {
                path: rsrc_file.to_path_buf(),
                message: "description file has no name".to_string(),
            })?;

        let relative = rsrc_file.strip_prefix(root).map_err(|_| RsrcError::Io {
            path: rsrc_file.to_path_buf(),
            message: format!("description file is outside of {}", root.display()),
        })?;

        let mut guard = String::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                if let Component::Normal(part) = component {
                    guard.push_str(&part.to_string_lossy());
                    guard.push('/');
                }
            }
        }
        guard.push_str(&stem);
        guard.push_str("RESOURCES_H_");

        let dir = rsrc_file.parent().unwrap_or(root);

        Ok(Self {
            namespace: format!("{}Resources", identifier(&stem)),
            guard: guard_macro(&guard),
            dest_base: dir.join(format!("{stem}Resources")),
        })
    }

    pub fn static_path(&self) -> PathBuf {
        with_suffix(&self.dest_base, ".h")
    }

    pub fn dynamic_path(&self) -> PathBuf {
        with_suffix(&self.dest_base, "Dynamic.h")
    }

    pub fn dynamic_values_path(&self) -> PathBuf {
        with_suffix(&self.dest_base, "DynamicValues.h")
    }
}

/// Rendered content of the three mapping headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingFiles {
    pub static_header: String,
    pub dynamic_header: String,
    pub dynamic_values: String,
}

impl MappingFiles {
    /// Render the headers for one description file's entries.
    ///
    /// Entries loaded `on_init`, fonts and sounds go to the static header;
    /// `on_demand` entries go to the dynamic header and the values list.
    pub fn render(names: &MappingNames, entries: &[ResourceEntry]) -> Self {
        let dynamic_namespace = format!("{}Dynamic", names.namespace);
        let dynamic_guard = format!("{}DYNAMIC", names.guard);

        let mut static_header = open_header(&names.guard, &names.namespace);
        let mut dynamic_header = open_header(&dynamic_guard, &dynamic_namespace);
        let mut dynamic_values = String::from(GENERATED_NOTE);
        dynamic_values.push_str("/* dynamic resource values\n");

        for entry in entries {
            let hash = entry.hash_literal();
            let line = format!("{INDENT}{INDENT}{} = {hash},\n", entry.tag);

            if entry.load_timing() == Some(LoadTiming::OnDemand) {
                dynamic_header.push_str(&line);
                dynamic_values.push_str(&hash);
                dynamic_values.push('\n');
            } else {
                static_header.push_str(&line);
            }
        }

        close_header(&mut static_header, &names.guard, &names.namespace);
        close_header(&mut dynamic_header, &dynamic_guard, &dynamic_namespace);
        dynamic_values.push_str("*/");

        Self {
            static_header,
            dynamic_header,
            dynamic_values,
        }
    }

    /// Write the three headers to their destinations.
    pub fn write(&self, names: &MappingNames) -> Result<()> {
        for (path, content) in [
            (names.static_path(), &self.static_header),
            (names.dynamic_path(), &self.dynamic_header),
            (names.dynamic_values_path(), &self.dynamic_values),
        ] {
            fs::write(&path, content).map_err(|e| RsrcError::Io {
                path: path.clone(),
                message: format!("Failed to write mapping header: {}", e),
            })?;
        }
        Ok(())
    }
}

fn open_header(guard: &str, namespace: &str) -> String {
    let mut out = String::from(GENERATED_NOTE);
    out.push_str(&format!(
        "#ifndef {guard}\n#define {guard}\n\n#include <cstdint>\n\nnamespace {namespace}\n{{\n\
         {INDENT}enum ResourceTags : {TAG_TYPE}\n{INDENT}{{\n"
    ));
    out
}

fn close_header(out: &mut String, guard: &str, namespace: &str) {
    out.push_str(&format!(
        "{INDENT}}}; /* enum ResourceTags */\n}} /* namespace {namespace} */\n\n#endif /* {guard} */"
    ));
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

fn guard_macro(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn identifier(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryPayload, EntryType, Rect, SoundCategory, SoundLevel};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn visual(tag: &str, hash: u64, load: LoadTiming) -> ResourceEntry {
        ResourceEntry {
            tag: tag.to_string(),
            entry_type: EntryType::Image,
            source_path: PathBuf::from("/g/a.png"),
            content_hash: hash,
            file_size_kb: 1,
            payload: EntryPayload::Visual {
                screen_rect: Rect::new(0, 0, 1, 1),
                sub_rects: vec![Rect::new(0, 0, 1, 1)],
                load,
            },
        }
    }

    fn names() -> MappingNames {
        MappingNames::for_description(Path::new("/g"), Path::new("/g/engine/menu/menu.rsrc"))
            .unwrap()
    }

    #[test]
    fn test_names() {
        let names = names();
        assert_eq!(names.namespace, "menuResources");
        assert_eq!(names.guard, "ENGINE_MENU_MENURESOURCES_H_");
        assert_eq!(names.static_path(), PathBuf::from("/g/engine/menu/menuResources.h"));
        assert_eq!(
            names.dynamic_values_path(),
            PathBuf::from("/g/engine/menu/menuResourcesDynamicValues.h")
        );
    }

    #[test]
    fn test_names_sanitize_identifiers() {
        let names =
            MappingNames::for_description(Path::new("/g"), Path::new("/g/ui-kit/2d.rsrc")).unwrap();
        assert_eq!(names.namespace, "_2dResources");
        assert_eq!(names.guard, "UI_KIT_2DRESOURCES_H_");
    }

    #[test]
    fn test_names_outside_root() {
        assert!(MappingNames::for_description(Path::new("/g"), Path::new("/h/a.rsrc")).is_err());
    }

    #[test]
    fn test_render_splits_by_load_timing() {
        let entries = [
            visual("BACKGROUND", 0x10, LoadTiming::OnInit),
            visual("POPUP", 0x20, LoadTiming::OnDemand),
            ResourceEntry {
                tag: "CLICK".to_string(),
                entry_type: EntryType::Sound,
                source_path: PathBuf::from("/g/c.wav"),
                content_hash: 0x30,
                file_size_kb: 1,
                payload: EntryPayload::Sound {
                    category: SoundCategory::Chunk,
                    level: SoundLevel::Low,
                },
            },
        ];
        let files = MappingFiles::render(&names(), &entries);

        assert_eq!(
            files.static_header,
            format!(
                "{GENERATED_NOTE}#ifndef ENGINE_MENU_MENURESOURCES_H_\n\
                 #define ENGINE_MENU_MENURESOURCES_H_\n\n\
                 #include <cstdint>\n\n\
                 namespace menuResources\n{{\n  enum ResourceTags : uint64_t\n  {{\n\
                 \x20   BACKGROUND = 0x0000000000000010,\n\
                 \x20   CLICK = 0x0000000000000030,\n\
                 \x20 }}; /* enum ResourceTags */\n\
                 }} /* namespace menuResources */\n\n\
                 #endif /* ENGINE_MENU_MENURESOURCES_H_ */"
            )
        );
        assert!(files
            .dynamic_header
            .contains("namespace menuResourcesDynamic\n"));
        assert!(files
            .dynamic_header
            .contains("#ifndef ENGINE_MENU_MENURESOURCES_H_DYNAMIC\n"));
        assert!(files.dynamic_header.contains("    POPUP = 0x0000000000000020,\n"));
        assert!(!files.dynamic_header.contains("BACKGROUND"));
        assert!(files.dynamic_values.ends_with("0x0000000000000020\n*/"));
    }

    #[test]
    fn test_render_empty_headers_are_complete() {
        let files = MappingFiles::render(&names(), &[]);
        assert_eq!(
            files.dynamic_header,
            format!(
                "{GENERATED_NOTE}#ifndef ENGINE_MENU_MENURESOURCES_H_DYNAMIC\n\
                 #define ENGINE_MENU_MENURESOURCES_H_DYNAMIC\n\n\
                 #include <cstdint>\n\n\
                 namespace menuResourcesDynamic\n{{\n  enum ResourceTags : uint64_t\n  {{\n\
                 \x20 }}; /* enum ResourceTags */\n\
                 }} /* namespace menuResourcesDynamic */\n\n\
                 #endif /* ENGINE_MENU_MENURESOURCES_H_DYNAMIC */"
            )
        );
    }

    #[test]
    fn test_write_creates_three_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("menu.rsrc");
        let names = MappingNames::for_description(dir.path(), &file).unwrap();

        MappingFiles::render(&names, &[]).write(&names).unwrap();

        assert!(names.static_path().exists());
        assert!(names.dynamic_path().exists());
        assert!(names.dynamic_values_path().exists());
        assert_eq!(names.guard, "MENURESOURCES_H_");
    }
}
