/// Server side conversion of a Google native document into a portable format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub source_mime: &'static str,
    pub export_mime: &'static str,
    pub extension: &'static str,
}

pub static CONVERSIONS: &[Conversion] = &[
    Conversion {
        source_mime: "application/vnd.google-apps.document",
        export_mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        extension: "docx",
    },
    Conversion {
        source_mime: "application/vnd.google-apps.spreadsheet",
        export_mime: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        extension: "xlsx",
    },
    Conversion {
        source_mime: "application/vnd.google-apps.presentation",
        export_mime: "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        extension: "pptx",
    },
];

pub static FOLDER_MIME: &str = "application/vnd.google-apps.folder";

pub fn conversion_for(mime_type: &str) -> Option<&'static Conversion> {
    CONVERSIONS
        .iter()
        .find(|conversion| conversion.source_mime == mime_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_types_convert() {
        let doc = conversion_for("application/vnd.google-apps.document").unwrap();
        assert_eq!(doc.extension, "docx");

        let sheet = conversion_for("application/vnd.google-apps.spreadsheet").unwrap();
        assert_eq!(sheet.extension, "xlsx");

        let slides = conversion_for("application/vnd.google-apps.presentation").unwrap();
        assert_eq!(slides.extension, "pptx");
        assert_eq!(
            slides.export_mime,
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        );
    }

    #[test]
    fn other_types_download_raw() {
        assert_eq!(conversion_for("image/png"), None);
        assert_eq!(conversion_for("application/pdf"), None);
        assert_eq!(conversion_for(FOLDER_MIME), None);
        assert_eq!(conversion_for("application/vnd.google-apps.form"), None);
    }
}
