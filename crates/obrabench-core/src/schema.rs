/// Arrow schemas for the delimited tables exchanged with the user.
///
/// Every column is `Utf8`: numbers are stored pre-formatted in the regional
/// convention so the file opens correctly in a pt-BR spreadsheet.
pub mod tables {
    use arrow::datatypes::{DataType, Field, Schema};

    pub const USE: &str = "Usar";
    pub const CONTROL_ID: &str = "Controle PNCP";
    pub const DATE: &str = "Data";
    pub const ORGANIZATION: &str = "Órgão";
    pub const DESCRIPTION: &str = "Descrição";
    pub const PRICE: &str = "Valor";
    pub const SUGGESTED_AREA: &str = "Área Sugerida (m²)";
    pub const AREA: &str = "Área (m²)";
    pub const PNCP_LINK: &str = "Link PNCP";
    pub const GOOGLE_LINK: &str = "Link Google";
    pub const INDEX: &str = "Índice (R$/m²)";

    pub const WORKING_COLUMNS: &[&str] = &[
        USE,
        CONTROL_ID,
        DATE,
        ORGANIZATION,
        DESCRIPTION,
        PRICE,
        SUGGESTED_AREA,
        AREA,
        PNCP_LINK,
        GOOGLE_LINK,
    ];

    pub const EXPORT_COLUMNS: &[&str] = &[CONTROL_ID, ORGANIZATION, DESCRIPTION, PRICE, AREA, INDEX];

    /// Schema for the working table written by a search and edited by the user.
    pub fn working_schema() -> Schema {
        utf8_schema(WORKING_COLUMNS)
    }

    /// Schema for the calculation export: one row per contributing sample.
    pub fn export_schema() -> Schema {
        utf8_schema(EXPORT_COLUMNS)
    }

    /// All-`Utf8`, non-nullable schema with the given column names.
    pub fn utf8_schema(columns: &[&str]) -> Schema {
        Schema::new(
            columns
                .iter()
                .map(|name| Field::new(*name, DataType::Utf8, false))
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::tables;

    #[test]
    fn working_schema_has_expected_fields() {
        let schema = tables::working_schema();
        assert_eq!(schema.fields().len(), 10);
        assert!(schema.field_with_name(tables::USE).is_ok());
        assert!(schema.field_with_name(tables::AREA).is_ok());
        assert!(schema.field_with_name(tables::SUGGESTED_AREA).is_ok());
    }

    #[test]
    fn export_schema_has_expected_fields() {
        let schema = tables::export_schema();
        assert_eq!(schema.fields().len(), 6);
        assert_eq!(schema.field(5).name(), tables::INDEX);
    }
}
