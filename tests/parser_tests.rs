use ip_symbolizer::parser::disassembly::{extract_function_header, extract_mnemonic};
use ip_symbolizer::parser::samples::parse_record;
use ip_symbolizer::parser::{
    read_samples, DisassemblyReader, LineKind, MalformedPolicy, SampleLayout,
};
use ip_symbolizer::utils::ParseError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_read_samples_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "IP: ffffffff80001013 1").unwrap();
    writeln!(file, "IP: ffffffff80001001 2").unwrap();

    let trace = read_samples(file.path(), &SampleLayout::default(), MalformedPolicy::Fail).unwrap();

    assert_eq!(trace.samples.len(), 2);
    assert_eq!(trace.samples[0].address, "ffffffff80001013");
    assert_eq!(trace.samples[1].task_id.as_str(), "2");
    assert_eq!(trace.skipped, 0);
}

#[test]
fn test_malformed_record_names_file_and_line() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "IP: ffffffff80001013 1").unwrap();
    writeln!(file, "IP: ffff").unwrap();

    let err = read_samples(file.path(), &SampleLayout::default(), MalformedPolicy::Fail).unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, ParseError::MalformedSampleRecord { line: 2, .. }));
    assert!(message.contains(&file.path().display().to_string()));
    assert!(message.contains(":2:"));
}

#[test]
fn test_missing_trace_file() {
    let result = read_samples(
        "/nonexistent/samples.txt",
        &SampleLayout::default(),
        MalformedPolicy::Skip,
    );
    assert!(matches!(result, Err(ParseError::Io { .. })));
}

#[test]
fn test_custom_layout_with_wide_task_field() {
    let layout = SampleLayout {
        address_start: 0,
        address_end: 8,
        task_offset: 9,
        task_width: 3,
    };

    let sample = parse_record("0040abcd t12", &layout).unwrap();
    assert_eq!(sample.address, "0040abcd");
    assert_eq!(sample.task_id.as_str(), "t12");
}

#[test]
fn test_header_and_mnemonic_helpers() {
    assert_eq!(extract_function_header("<foo>:"), Some("<foo>:"));
    assert_eq!(extract_function_header("  call 401000 <foo>"), None);
    assert_eq!(extract_mnemonic("  4: deadbeef  mov eax, ebx"), Some("mov"));
    assert_eq!(extract_mnemonic("  4: deadbeef"), None);
}

#[test]
fn test_disassembly_reader_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "0000000000401000 <_start>:").unwrap();
    writeln!(file, "  401000:\t31 ed                \txor    %ebp,%ebp").unwrap();
    writeln!(file).unwrap();

    let kinds: Vec<LineKind> = DisassemblyReader::open(file.path())
        .unwrap()
        .map(|line| line.unwrap().kind())
        .collect();

    assert_eq!(
        kinds,
        vec![LineKind::FunctionHeader, LineKind::Instruction, LineKind::Other]
    );
}
