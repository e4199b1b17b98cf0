//! Static page content: folios, select options, menu and links

use crate::state::{Column, SelectItem, TableRow, RESPUESTA_APROBADA, RESPUESTA_RECHAZADA};

/// A row of the folios table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolioRow {
    pub key: &'static str,
    pub nombre_cliente: &'static str,
    pub fecha_folio: &'static str,
    pub folio_sac: &'static str,
    pub folio_mv: &'static str,
    pub registrado: &'static str,
    pub opciones: &'static str,
    pub detalles: &'static str,
}

impl TableRow for FolioRow {
    fn row_key(&self) -> &str {
        self.key
    }

    fn cell(&self, column_key: &str) -> Option<&str> {
        Some(match column_key {
            "nombreCliente" => self.nombre_cliente,
            "fechaFolio" => self.fecha_folio,
            "folioSAC" => self.folio_sac,
            "folioMV" => self.folio_mv,
            "registrado" => self.registrado,
            "opciones" => self.opciones,
            "detalles" => self.detalles,
            _ => return None,
        })
    }
}

pub const FOLIO_COLUMNS: &[Column] = &[
    Column::new("nombreCliente", "Nombre de Cliente"),
    Column::new("fechaFolio", "Fecha de Folio"),
    Column::new("folioSAC", "Folio SAC"),
    Column::new("folioMV", "Folio MV"),
    Column::new("registrado", "Registrado"),
    Column::new("opciones", "Options"),
    Column::new("detalles", "Details"),
];

/// Columns rendered as links
pub const LINK_COLUMNS: &[&str] = &["opciones", "detalles"];

pub fn folios() -> Vec<FolioRow> {
    vec![FolioRow {
        key: "1",
        nombre_cliente: "Jerry Mattedi",
        fecha_folio: "19 May, 2021 · 10:10 AM",
        folio_sac: "251-661-5362",
        folio_mv: "12345678",
        registrado: "Sí",
        opciones: "Options",
        detalles: "Details",
    }]
}

pub fn tipo_expediente_options() -> Vec<SelectItem> {
    vec![
        SelectItem::new("credito", "Expediente Crédito"),
        SelectItem::new("captacion", "Expediente Captación"),
    ]
}

pub fn respuesta_options() -> Vec<SelectItem> {
    vec![
        SelectItem::new(RESPUESTA_APROBADA, "Aprobada"),
        SelectItem::new(RESPUESTA_RECHAZADA, "Rechazada"),
    ]
}

/// Motivo choices depend on the respuesta; anything but "aprobada"
/// gets the rejection list
pub fn motivo_options(respuesta: &str) -> Vec<SelectItem> {
    if respuesta == RESPUESTA_APROBADA {
        vec![
            SelectItem::new("datos-verificados", "Datos verificados"),
            SelectItem::new("documento-legible", "Documento legible"),
            SelectItem::new("foto-coincide", "Fotografía coincide"),
            SelectItem::new("vigencia-confirmada", "Vigencia confirmada"),
        ]
    } else {
        vec![
            SelectItem::new("foto-no-coincide", "Fotografía del cliente no coincide"),
            SelectItem::new("foto-borrosa", "Fotografía borrosa o manipulada"),
            SelectItem::new("foto-no-visible", "Fotografía no visible"),
            SelectItem::new("documento-ilegible", "Documento ilegible"),
            SelectItem::new("datos-inconsistentes", "Datos inconsistentes"),
            SelectItem::new("documento-vencido", "Documento vencido"),
        ]
    }
}

/// Label for a key of any of the page's option lists
pub fn option_label(options: &[SelectItem], key: &str) -> Option<&'static str> {
    options.iter().find(|o| o.key == key).map(|o| o.label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

const fn item(id: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem {
        id,
        label,
        icon,
        active: false,
    }
}

pub const MENU_SECTIONS: &[MenuSection] = &[
    MenuSection {
        title: "Principal",
        items: &[
            item("dashboard", "Dashboard", "▦"),
            MenuItem {
                id: "verification",
                label: "Verificación",
                icon: "✔",
                active: true,
            },
            item("records", "Registros", "▤"),
        ],
    },
    MenuSection {
        title: "Biométricos",
        items: &[
            item("fingerprints", "Huellas Dactilares", "◎"),
            item("facial", "Reconocimiento Facial", "☺"),
            item("documents", "Documentos", "▯"),
        ],
    },
    MenuSection {
        title: "Administración",
        items: &[
            item("users", "Usuarios", "☷"),
            item("reports", "Reportes", "▥"),
            item("settings", "Configuración", "⚙"),
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalLink {
    pub id: &'static str,
    pub label: &'static str,
    pub url: &'static str,
}

pub const EXTERNAL_LINKS: &[ExternalLink] = &[
    ExternalLink {
        id: "ine",
        label: "INE",
        url: "https://listanominal.ine.mx",
    },
    ExternalLink {
        id: "curp",
        label: "CURP",
        url: "https://www.gob.mx/curp/",
    },
    ExternalLink {
        id: "sepomex",
        label: "SEPOMEX",
        url: "https://www.correosdemexico.gob.mx/SSLServicios/ConsultaCP/Descarga.aspx",
    },
    ExternalLink {
        id: "otros",
        label: "Otros",
        url: "#",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folio_cells() {
        let row = &folios()[0];
        assert_eq!(row.row_key(), "1");
        assert_eq!(row.cell("nombreCliente"), Some("Jerry Mattedi"));
        assert_eq!(row.cell("folioSAC"), Some("251-661-5362"));
        assert_eq!(row.cell("unknown"), None);
        for column in FOLIO_COLUMNS {
            assert!(row.cell(column.key).is_some(), "missing {}", column.key);
        }
    }

    #[test]
    fn test_motivo_options_follow_respuesta() {
        assert_eq!(motivo_options("rechazada").len(), 6);
        assert_eq!(motivo_options("aprobada").len(), 4);
        assert_eq!(motivo_options("").len(), 6);
        assert_eq!(
            option_label(&motivo_options("rechazada"), "documento-vencido"),
            Some("Documento vencido")
        );
    }

    #[test]
    fn test_single_active_menu_item() {
        let active: Vec<_> = MENU_SECTIONS
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|i| i.active)
            .map(|i| i.id)
            .collect();
        assert_eq!(active, vec!["verification"]);
    }
}
