use csv_sql_convert::{
    ColumnType, ConversionRequest, ConvertError, EmitOptions, InferenceMode, convert,
    generate_sql, infer_schema, read_table,
};
use std::io::Cursor;

const STUDENTS: &str = "studentID,name,age,hometown\n1803234,Jim Jones,26,New York\n1803424,Sara Carrey,55,Chicago";

#[test]
fn test_students_csv_to_sql_generation() {
    let table = read_table(Cursor::new(STUDENTS), ",").expect("parsing failed for students csv");
    let types = infer_schema(&table).expect("schema inference failed for students csv");
    assert_eq!(
        types,
        vec![
            ColumnType::Integer, // 1803234
            ColumnType::Text,    // jim jones
            ColumnType::Integer, // 26
            ColumnType::Text     // new york
        ]
    );

    let sql = generate_sql("Students", &table, &types, &EmitOptions::default())
        .expect("sql generation failed for students csv");
    let expected_sql = "--Students\nCREATE TABLE Students (\n    studentID INTEGER,\n    name VARCHAR(30),\n    age INTEGER,\n    hometown VARCHAR(30),\n    PRIMARY KEY (studentID)\n);\n\n--Data\nINSERT INTO Students VALUES (1803234,'Jim Jones',26,'New York');\nINSERT INTO Students VALUES (1803424,'Sara Carrey',55,'Chicago');";
    assert_eq!(sql.as_str(), expected_sql);
}

#[test]
fn test_convert_matches_manual_pipeline() {
    let request = ConversionRequest::new("Students", ",");
    let script = convert(STUDENTS, &request).expect("conversion failed");
    assert_eq!(script.insert_count(), 2);
    assert!(script.as_str().starts_with("--Students\nCREATE TABLE Students (\n"));
}

#[test]
fn test_mixed_types_with_semicolon_and_bom() {
    let csv_data = "\u{feff}id;price;label\r\n007;3.14;first item\r\n2;20;second item\r\n";
    let request = ConversionRequest::new("Items", ";");
    let script = convert(csv_data, &request).expect("conversion failed for mixed csv");
    let sql = script.as_str();
    assert!(sql.contains("    id INTEGER,\n    price DECIMAL(6,6),\n    label VARCHAR(30),\n"));
    assert!(sql.contains("    PRIMARY KEY (id)\n"));
    assert!(sql.contains("INSERT INTO Items VALUES (007,3.14,'first item');"));
    assert!(sql.ends_with("INSERT INTO Items VALUES (2,20,'second item');"));
}

#[test]
fn test_create_table_column_list_round_trips() {
    let script = convert(STUDENTS, &ConversionRequest::new("Students", ",")).unwrap();
    let columns: Vec<(String, ColumnType)> = script
        .as_str()
        .lines()
        .skip_while(|line| !line.starts_with("CREATE TABLE"))
        .skip(1)
        .take_while(|line| !line.trim_start().starts_with("PRIMARY KEY"))
        .map(|line| {
            let line = line.trim().trim_end_matches(',');
            let (title, sql_type) = line.split_once(' ').expect("title and type");
            (title.to_string(), sql_type.parse().expect("known sql type"))
        })
        .collect();
    assert_eq!(
        columns,
        vec![
            ("studentID".to_string(), ColumnType::Integer),
            ("name".to_string(), ColumnType::Text),
            ("age".to_string(), ColumnType::Integer),
            ("hometown".to_string(), ColumnType::Text),
        ]
    );
}

#[test]
fn test_full_scan_request_widens_columns() {
    let csv_data = "id,score\n1,10\n2,10.5";
    let first_row = convert(csv_data, &ConversionRequest::new("S", ",")).unwrap();
    assert!(first_row.as_str().contains("score INTEGER,"));

    let request = ConversionRequest::new("S", ",").with_mode(InferenceMode::FullScan);
    let full_scan = convert(csv_data, &request).unwrap();
    assert!(full_scan.as_str().contains("score DECIMAL(6,6),"));
}

#[test]
fn test_escape_quotes_request() {
    let csv_data = "id,name\n1,O'Brien";
    let request = ConversionRequest::default().with_escape_quotes(true);
    let script = convert(csv_data, &request).unwrap();
    assert!(script.as_str().ends_with("INSERT INTO NewTable VALUES (1,'O''Brien');"));
}

#[test]
fn test_trailing_separator_adds_no_column() {
    let script = convert("a,b,\n1,2,", &ConversionRequest::new("T", ",")).unwrap();
    let sql = script.as_str();
    assert!(sql.contains("    a INTEGER,\n    b INTEGER,\n    PRIMARY KEY (a)\n"));
    assert!(!sql.contains("     VARCHAR(30)"));
    assert!(sql.ends_with("INSERT INTO T VALUES (1,2);"));
}

#[test]
fn test_blank_line_in_single_column_becomes_a_row() {
    let script = convert("name\nJim\n\nSara", &ConversionRequest::new("People", ",")).unwrap();
    assert_eq!(script.insert_count(), 3);
    assert!(script.as_str().contains("INSERT INTO People VALUES ('');"));
}

#[test]
fn test_convert_with_empty_input() {
    let result = convert("", &ConversionRequest::default());
    assert!(matches!(result, Err(ConvertError::EmptyInput)));
}

#[test]
fn test_convert_with_only_headers() {
    let result = convert("col_a,col_b,col_c\n", &ConversionRequest::default());
    assert!(matches!(result, Err(ConvertError::EmptyTable)));
}

#[test]
fn test_malformed_csv_different_column_counts() {
    // the second data row has fewer columns than the header
    let csv_data = "header1,header2,header3\nval1,val2,val3\nshort_val1,short_val2";
    let result = convert(csv_data, &ConversionRequest::default());
    assert!(matches!(
        result,
        Err(ConvertError::MalformedRow {
            line: 3,
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn test_default_request() {
    let request = ConversionRequest::default();
    assert_eq!(request.table_name, "NewTable");
    assert_eq!(request.separator, ",");
    assert_eq!(request.mode, InferenceMode::FirstRow);
    assert!(!request.escape_quotes);
}
