// Raw export handling: repair concatenated documents, parse them, clean the rows
pub mod cleaning;
pub mod csv_parser;
pub mod repair;
