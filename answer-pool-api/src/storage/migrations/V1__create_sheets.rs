/// Create the sheets registry and the rows table backing every sheet
pub fn migration() -> String {
    r#"
CREATE TABLE sheets (
    name TEXT PRIMARY KEY,
    created_at INTEGER NOT NULL
);

CREATE TABLE sheet_rows (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sheet TEXT NOT NULL,
    cells TEXT NOT NULL,
    FOREIGN KEY (sheet) REFERENCES sheets (name) ON DELETE CASCADE
);

CREATE INDEX idx_sheet_rows_sheet
    ON sheet_rows(sheet, id);
"#
    .to_string()
}
