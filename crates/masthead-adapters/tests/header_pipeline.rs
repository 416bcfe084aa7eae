//! End-to-end scenarios: the header service driven with real adapters.

use std::io::{self, Cursor, Read};

use masthead_adapters::{DelimiterRenderer, MemoryProbe, SourceMapJoiner};
use masthead_core::prelude::*;

fn service(config: HeaderConfig, probe: MemoryProbe) -> HeaderService {
    HeaderService::new(
        config,
        Box::new(DelimiterRenderer::new()),
        Box::new(SourceMapJoiner::new()),
        Box::new(probe),
    )
}

/// A registered fixture file with buffered content, like the host pipeline
/// would deliver it.
fn fixture(content: &str) -> (FileObject, MemoryProbe) {
    let probe = MemoryProbe::new();
    probe.add_file("/work/fixture/file.txt");
    let file = FileObject::new("fixture/file.txt")
        .unwrap()
        .with_path("/work/fixture/file.txt")
        .with_buffer(content.as_bytes().to_vec());
    (file, probe)
}

fn buffer_of(item: &PipelineItem) -> &[u8] {
    match item.as_file().expect("expected a file item").contents() {
        Contents::Buffered(bytes) => bytes,
        Contents::Streamed(_) => panic!("expected buffered contents"),
    }
}

#[test]
fn prepends_the_header_to_the_file_content() {
    let (file, probe) = fixture("Hello world");
    let service = service(HeaderConfig::new("And then i said : "), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"And then i said : Hello world");
}

#[test]
fn formats_the_header() {
    let (file, probe) = fixture("Hello world");
    let config = HeaderConfig::new("And then <%= foo %> said : ").with_field("foo", "you");
    let service = service(config, probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"And then you said : Hello world");
}

#[test]
fn formats_the_header_with_dollar_delimiters() {
    let (file, probe) = fixture("Hello world");
    let config = HeaderConfig::new("And then ${foo} said : ").with_field("foo", "you");
    let service = service(config, probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"And then you said : Hello world");
}

#[test]
fn accesses_the_current_file() {
    let (file, probe) = fixture("Hello world");
    let service = service(
        HeaderConfig::new("<%= file.relative %>\n<%= file.path %>\n"),
        probe,
    );

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(
        buffer_of(&item),
        b"fixture/file.txt\n/work/fixture/file.txt\nHello world"
    );
}

#[test]
fn accesses_the_data_of_the_current_file() {
    let (file, probe) = fixture("Hello world");
    let file = file.with_data("license", "WTFPL");
    let service = service(HeaderConfig::new("<%= license %>\n"), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"WTFPL\nHello world");
}

#[test]
fn empty_header_is_an_identity() {
    let (file, probe) = fixture("Hello world");
    let service = service(HeaderConfig::default(), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"Hello world");
    assert!(item.as_file().unwrap().source_map().is_none());
}

#[test]
fn literal_header_skips_rendering() {
    let (file, probe) = fixture("Hello world");
    let service = service(HeaderConfig::literal("<%= verbatim %> "), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"<%= verbatim %> Hello world");
}

#[test]
fn unregistered_path_passes_through() {
    let probe = MemoryProbe::new();
    let file = FileObject::new("fixture/file.txt")
        .unwrap()
        .with_path("/work/fixture/file.txt")
        .with_buffer(b"Hello world".to_vec());
    let service = service(HeaderConfig::new("H: "), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"Hello world");
    assert!(item.as_file().unwrap().source_map().is_none());
}

#[test]
fn directories_pass_through() {
    let probe = MemoryProbe::new();
    probe.add_file("/work/fixture");
    probe.add_directory("/work/fixture");
    let file = FileObject::new("fixture")
        .unwrap()
        .with_path("/work/fixture");
    let service = service(HeaderConfig::new("H: "), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"");
}

#[test]
fn pathless_files_pass_through() {
    let probe = MemoryProbe::new();
    let file = FileObject::new("virtual.txt")
        .unwrap()
        .with_buffer(b"Hello world".to_vec());
    let service = service(HeaderConfig::new("H: "), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"Hello world");
}

#[test]
fn bare_names_pass_through() {
    let service = service(HeaderConfig::new("H: "), MemoryProbe::new());
    let mut item = PipelineItem::Name("file.txt".into());
    service.process(&mut item).unwrap();
    assert!(matches!(item, PipelineItem::Name(name) if name == "file.txt"));
}

#[test]
fn prepends_the_header_to_stream_content() {
    let probe = MemoryProbe::new();
    probe.add_file("/work/fixture/anotherFile.txt");
    let file = FileObject::new("fixture/anotherFile.txt")
        .unwrap()
        .with_path("/work/fixture/anotherFile.txt")
        .with_stream(Box::new(Cursor::new(b"Hello world".to_vec())));
    let service = service(HeaderConfig::new("And then i said : "), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    let file = item.into_file().unwrap();
    assert!(file.is_stream());
    match file.into_contents() {
        Contents::Streamed(mut stream) => {
            let mut read = Vec::new();
            stream.read_to_end(&mut read).unwrap();
            assert_eq!(read, b"And then i said : Hello world");
            assert_eq!(read.len(), "And then i said : ".len() + "Hello world".len());
        }
        Contents::Buffered(_) => panic!("streamed input must stay streamed"),
    }
}

/// A stream that yields some bytes, then fails.
struct FailingReader {
    head: Cursor<Vec<u8>>,
    failed: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.head.read(buf)?;
        if n > 0 {
            return Ok(n);
        }
        if self.failed {
            return Ok(0);
        }
        self.failed = true;
        Err(io::Error::other("upstream read failed"))
    }
}

#[test]
fn stream_faults_reach_the_downstream_reader() {
    let probe = MemoryProbe::new();
    probe.add_file("/work/fixture/broken.txt");
    let file = FileObject::new("fixture/broken.txt")
        .unwrap()
        .with_path("/work/fixture/broken.txt")
        .with_stream(Box::new(FailingReader {
            head: Cursor::new(b"Hello".to_vec()),
            failed: false,
        }));
    let service = service(HeaderConfig::new("H: "), probe);

    // the item is emitted before anyone reads the spliced stream
    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    match item.into_file().unwrap().into_contents() {
        Contents::Streamed(mut stream) => {
            let mut read = Vec::new();
            let err = stream.read_to_end(&mut read).unwrap_err();
            assert_eq!(err.to_string(), "upstream read failed");
        }
        Contents::Buffered(_) => panic!("streamed input must stay streamed"),
    }
}

#[test]
fn preserves_input_order() {
    let probe = MemoryProbe::new();
    let mut items = Vec::new();
    for index in 0..5 {
        let path = format!("/work/fixture/{index}.txt");
        probe.add_file(&path);
        items.push(PipelineItem::File(
            FileObject::new(format!("fixture/{index}.txt"))
                .unwrap()
                .with_path(path)
                .with_buffer(format!("body {index}").into_bytes()),
        ));
    }
    let service = service(HeaderConfig::new("H: "), probe);

    let emitted = service.process_all(items).unwrap();
    assert_eq!(emitted.len(), 5);
    for (index, item) in emitted.iter().enumerate() {
        assert_eq!(buffer_of(item), format!("H: body {index}").as_bytes());
    }
}

#[test]
fn zero_files_complete_normally() {
    let service = service(HeaderConfig::new("use strict;"), MemoryProbe::new());
    assert!(service.process_all(Vec::new()).unwrap().is_empty());
}

#[test]
fn unresolved_references_surface_and_abort_the_item() {
    let (file, probe) = fixture("Hello world");
    let service = service(HeaderConfig::new("<%= missing %>\n"), probe);

    let mut item = PipelineItem::File(file);
    let err = service.process(&mut item).unwrap_err();
    assert!(err.is_template_error());
    // the failed item was not mutated
    assert_eq!(buffer_of(&item), b"Hello world");
}

#[test]
fn header_insertion_keeps_the_source_map_valid() {
    let probe = MemoryProbe::new();
    probe.add_file("/work/src/app.js");
    let map = SourceMap::from_json(
        r#"{"version":3,"sources":["src/app.js"],"names":[],"mappings":"AAAA"}"#,
    )
    .unwrap();
    let file = FileObject::new("src/app.js")
        .unwrap()
        .with_path("/work/src/app.js")
        .with_buffer(b"let a;\n".to_vec())
        .with_source_map(map);
    let service = service(HeaderConfig::new("// banner\n"), probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(buffer_of(&item), b"// banner\nlet a;\n");
    let combined = item.as_file().unwrap().source_map().unwrap();
    // one full header line pushes every generated line down by one
    assert_eq!(combined.mappings, ";AAAA");
    assert_eq!(combined.sources, vec!["src/app.js"]);
    assert_eq!(combined.file.as_deref(), Some("app.js"));
}

#[test]
fn multi_line_template_headers_shift_by_their_rendered_size() {
    let probe = MemoryProbe::new();
    probe.add_file("/work/src/app.js");
    let map = SourceMap::from_json(
        r#"{"version":3,"sources":["src/app.js"],"names":[],"mappings":"AAAA"}"#,
    )
    .unwrap();
    let file = FileObject::new("src/app.js")
        .unwrap()
        .with_path("/work/src/app.js")
        .with_buffer(b"let a;\n".to_vec())
        .with_source_map(map);
    let config = HeaderConfig::new("/* <%= file.relative %> */\n/* <%= owner %> */\n")
        .with_field("owner", "build");
    let service = service(config, probe);

    let mut item = PipelineItem::File(file);
    service.process(&mut item).unwrap();

    assert_eq!(
        buffer_of(&item),
        b"/* src/app.js */\n/* build */\nlet a;\n"
    );
    assert_eq!(item.as_file().unwrap().source_map().unwrap().mappings, ";;AAAA");
}
