use inikit::{Mode, Parser};

const SAMPLE: &str = "; last modified 1 April 2001 by John Doe
[owner]
name = John Doe
organization = Acme Widgets Inc.

[database]
server = 192.0.2.62
port = 143
";

fn main() -> Result<(), inikit::Error> {
    // Strict parse of well-formed input
    let mut doc = Parser::new().parse(SAMPLE)?;

    println!("sections: {:?}", doc.section_names());
    println!("owner/name: {}", doc.get("owner", "name")?);

    // Mutate and render back to INI text
    doc.set("database", "port", "8143");
    doc.set("database", "file", "\"payroll.dat\"");
    println!("---\n{doc}");

    // The legacy dialect tolerates reserved characters in values
    let legacy = Parser::new().with_mode(Mode::Lenient);
    let doc = legacy.parse("[paths]\nfilter = name=*.dat;*.idx\n")?;
    println!("filter: {}", doc.get("paths", "filter")?);

    Ok(())
}
