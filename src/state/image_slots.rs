//! Image slots shown for each document tab

use super::form_data::TabType;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Only extension the upload prompt accepts
pub const ACCEPTED_EXTENSION: &str = "webp";

/// Slots per tab
pub const SLOT_COUNT: usize = 3;

/// Why an upload was refused
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Solo se permiten imágenes .webp: {}", path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("No se encontró el archivo {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No es un archivo: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Ranura de imagen desconocida: {0}")]
    UnknownSlot(String),
}

/// Where a slot's preview comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageSource {
    /// Bundled placeholder asset
    Mock {
        asset: String,
        mime: &'static str,
        size: &'static str,
    },
    /// File picked by the operator
    Uploaded { path: PathBuf, size_bytes: u64 },
}

impl ImageSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Mock { asset, mime, size } => format!("{asset} · {mime} · {size}"),
            Self::Uploaded { path, size_bytes } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("{name} · {} KB", size_bytes.div_ceil(1024))
            }
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }
}

/// One cell of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    pub id: String,
    pub label: &'static str,
    pub source: Option<ImageSource>,
}

/// A file accepted for a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// `img-1`, `img-2`, `img-3`
pub fn slot_id(index: usize) -> String {
    format!("img-{}", index + 1)
}

fn slot_index(id: &str) -> Option<usize> {
    let n: usize = id.strip_prefix("img-")?.parse().ok()?;
    (1..=SLOT_COUNT).contains(&n).then(|| n - 1)
}

fn asset_prefix(tab: TabType) -> &'static str {
    match tab {
        TabType::Identificacion => "id",
        TabType::Comprobante => "co",
        TabType::Propiedad => "es",
        TabType::Contrato => "cn",
        TabType::Contacto => "rf",
        TabType::Fotografia => "ft",
    }
}

/// Reject anything that is not an existing `.webp` file
pub fn check_upload(path: &Path) -> Result<UploadedFile, UploadError> {
    let accepted = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ACCEPTED_EXTENSION));
    if !accepted {
        return Err(UploadError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    let meta = std::fs::metadata(path).map_err(|source| UploadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(UploadError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(UploadedFile {
        path: path.to_path_buf(),
        size_bytes: meta.len(),
    })
}

/// Uploaded previews, per tab and slot
#[derive(Debug, Clone, Default)]
pub struct ImageSlots {
    uploads: HashMap<(TabType, usize), UploadedFile>,
    /// Show bundled mock previews when nothing was uploaded
    pub show_mocks: bool,
}

impl ImageSlots {
    pub fn with_mocks() -> Self {
        Self {
            uploads: HashMap::new(),
            show_mocks: true,
        }
    }

    /// The three items for a tab, uploaded sources replacing mocks
    pub fn items(&self, tab: TabType) -> Vec<ImageItem> {
        tab.image_labels()
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let source = match self.uploads.get(&(tab, i)) {
                    Some(file) => Some(ImageSource::Uploaded {
                        path: file.path.clone(),
                        size_bytes: file.size_bytes,
                    }),
                    None if self.show_mocks => Some(ImageSource::Mock {
                        asset: format!("{}{}.webp", asset_prefix(tab), i + 1),
                        mime: "image/webp",
                        size: "1.2MB",
                    }),
                    None => None,
                };
                ImageItem {
                    id: slot_id(i),
                    label,
                    source,
                }
            })
            .collect()
    }

    /// Validate and store a file for a slot of `tab`
    pub fn upload(
        &mut self,
        tab: TabType,
        slot: &str,
        path: &Path,
    ) -> Result<UploadedFile, UploadError> {
        let index = slot_index(slot).ok_or_else(|| UploadError::UnknownSlot(slot.to_string()))?;
        let file = check_upload(path)?;
        tracing::info!(tab = tab.key(), slot, path = %path.display(), "image uploaded");
        self.uploads.insert((tab, index), file.clone());
        Ok(file)
    }

    /// Uploaded files for a tab keyed by slot id
    pub fn files_for(&self, tab: TabType) -> BTreeMap<String, UploadedFile> {
        (0..SLOT_COUNT)
            .filter_map(|i| self.uploads.get(&(tab, i)).map(|f| (slot_id(i), f.clone())))
            .collect()
    }

    pub fn clear(&mut self) {
        self.uploads.clear();
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("biometricos-img-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, b"RIFF0000WEBP").unwrap();
        path
    }

    mod items {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_three_slots_with_canonical_labels() {
            let slots = ImageSlots::default();
            let items = slots.items(TabType::Contrato);
            assert_eq!(items.len(), 3);
            let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids, vec!["img-1", "img-2", "img-3"]);
            assert_eq!(items[2].label, "Firma");
            assert!(items.iter().all(|i| i.source.is_none()));
        }

        #[test]
        fn test_mock_sources() {
            let slots = ImageSlots::with_mocks();
            let items = slots.items(TabType::Propiedad);
            assert_eq!(
                items[0].source,
                Some(ImageSource::Mock {
                    asset: "es1.webp".into(),
                    mime: "image/webp",
                    size: "1.2MB",
                })
            );
        }
    }

    mod upload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_webp_and_replaces_source() {
            let path = temp_file("ine.webp");
            let mut slots = ImageSlots::with_mocks();
            let file = slots.upload(TabType::Identificacion, "img-2", &path).unwrap();
            assert_eq!(file.size_bytes, 12);

            let items = slots.items(TabType::Identificacion);
            assert!(items[1].source.as_ref().is_some_and(ImageSource::is_uploaded));
            assert!(!items[0].source.as_ref().is_some_and(ImageSource::is_uploaded));
            // Other tabs keep their own slots
            assert!(!slots.items(TabType::Comprobante)[1]
                .source
                .as_ref()
                .is_some_and(ImageSource::is_uploaded));
        }

        #[test]
        fn test_uppercase_extension_is_accepted() {
            let path = temp_file("FOTO.WEBP");
            assert!(check_upload(&path).is_ok());
        }

        #[test]
        fn test_rejects_other_extensions_and_keeps_slot() {
            let path = temp_file("ine.png");
            let mut slots = ImageSlots::default();
            let err = slots.upload(TabType::Identificacion, "img-1", &path).unwrap_err();
            assert!(matches!(err, UploadError::UnsupportedExtension { .. }));
            assert_eq!(slots.upload_count(), 0);
            assert!(slots.items(TabType::Identificacion)[0].source.is_none());
        }

        #[test]
        fn test_missing_file() {
            let err = check_upload(Path::new("/definitely/not/here.webp")).unwrap_err();
            assert!(matches!(err, UploadError::NotFound { .. }));
        }

        #[test]
        fn test_directory_with_webp_name_is_rejected() {
            let dir = std::env::temp_dir()
                .join(format!("biometricos-img-{}", uuid::Uuid::new_v4()))
                .join("carpeta.webp");
            std::fs::create_dir_all(&dir).unwrap();
            let mut slots = ImageSlots::default();
            let err = slots.upload(TabType::Identificacion, "img-1", &dir).unwrap_err();
            assert!(matches!(err, UploadError::NotAFile { .. }));
            assert_eq!(slots.upload_count(), 0);
        }

        #[test]
        fn test_unknown_slot() {
            let path = temp_file("a.webp");
            let mut slots = ImageSlots::default();
            let err = slots.upload(TabType::Contacto, "img-4", &path).unwrap_err();
            assert!(matches!(err, UploadError::UnknownSlot(_)));
        }

        #[test]
        fn test_files_for_tab_keyed_by_slot() {
            let path = temp_file("c.webp");
            let mut slots = ImageSlots::default();
            slots.upload(TabType::Comprobante, "img-3", &path).unwrap();
            slots.upload(TabType::Contacto, "img-1", &path).unwrap();

            let files = slots.files_for(TabType::Comprobante);
            assert_eq!(files.keys().collect::<Vec<_>>(), vec!["img-3"]);

            slots.clear();
            assert!(slots.files_for(TabType::Contacto).is_empty());
        }
    }
}
