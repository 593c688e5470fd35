//! End-to-end mapping of 2.x and 3.x products.

use std::path::PathBuf;

use onix_ingest::{RawProductRecord, SourceDocument, enumerate_products, parse_document};
use onix_model::{ClassificationRow, SubjectPhraseRule};
use onix_standards::{ClassificationTable, SubjectPhraseMatcher};
use onix_transform::{ExtractionContext, VersionAdapter, decode_runtime};
use proptest::prelude::*;

const ONIX_21: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ONIXMessage release="2.1">
  <Header><FromCompany>Harbor</FromCompany></Header>
  <Product>
    <ProductIdentifier><ProductIDType>03</ProductIDType><IDValue>0000000000001</IDValue></ProductIdentifier>
    <ProductIdentifier><ProductIDType>15</ProductIDType><IDValue>9780000000017</IDValue></ProductIdentifier>
    <Title><TitleType>01</TitleType><TitleText>The Quiet Harbor</TitleText><Subtitle>A Novel</Subtitle></Title>
    <Contributor><PersonName>Jane Doe</PersonName></Contributor>
    <Contributor><PersonName></PersonName></Contributor>
    <Contributor><PersonName>John Roe</PersonName></Contributor>
    <Extent><ExtentType>09</ExtentType><ExtentValue>001234500</ExtentValue><ExtentUnit>16</ExtentUnit></Extent>
    <BASICMainSubject>FIC022000</BASICMainSubject>
    <Subject><SubjectSchemeIdentifier>10</SubjectSchemeIdentifier><SubjectHeadingText>Civil War; World War</SubjectHeadingText></Subject>
    <Imprint><ImprintName>Harbor Books</ImprintName></Imprint>
    <PublicationDate>20240102</PublicationDate>
    <Language><LanguageCode>eng</LanguageCode></Language>
    <SupplyDetail>
      <OnSaleDate>20240109</OnSaleDate>
      <Price><CurrencyCode>CAD</CurrencyCode><PriceAmount>24.99</PriceAmount></Price>
      <Price><CurrencyCode>USD</CurrencyCode><PriceAmount>19.99</PriceAmount></Price>
    </SupplyDetail>
  </Product>
</ONIXMessage>"#;

const ONIX_30: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ONIXMessage release="3.0" xmlns="http://ns.editeur.org/onix/3.0/reference">
  <Product>
    <ProductIdentifier><ProductIDType>15</ProductIDType><IDValue>9780000000024</IDValue></ProductIdentifier>
    <DescriptiveDetail>
      <TitleDetail><TitleElement><TitlePrefix>The</TitlePrefix><TitleWithoutPrefix>Long Road</TitleWithoutPrefix></TitleElement></TitleDetail>
      <Contributor><PersonName>Ann Lee</PersonName></Contributor>
      <Extent><ExtentType>09</ExtentType><ExtentValue>125.5</ExtentValue><ExtentUnit>05</ExtentUnit></Extent>
      <Language><LanguageCode>eng</LanguageCode></Language>
      <Subject><SubjectSchemeIdentifier>10</SubjectSchemeIdentifier><SubjectCode>HIS000000</SubjectCode></Subject>
      <Subject><MainSubject/><SubjectSchemeIdentifier>10</SubjectSchemeIdentifier><SubjectCode>HIS027000</SubjectCode></Subject>
    </DescriptiveDetail>
    <CollateralDetail>
      <TextContent><Text>A history of cooking</Text></TextContent>
      <TextContent><Text>on the World War front.</Text></TextContent>
    </CollateralDetail>
    <PublishingDetail>
      <Imprint><ImprintName>Road House</ImprintName></Imprint>
      <PublishingDate><PublishingDateRole>01</PublishingDateRole><Date>20230301</Date></PublishingDate>
      <PublishingDate><PublishingDateRole>02</PublishingDateRole><Date>20230315</Date></PublishingDate>
    </PublishingDetail>
    <ProductSupply><SupplyDetail>
      <Price><CurrencyCode>USD</CurrencyCode><PriceAmount>29.00</PriceAmount></Price>
    </SupplyDetail></ProductSupply>
  </Product>
  <Product>
    <ProductIdentifier><ProductIDType>15</ProductIDType><IDValue>9780000000031</IDValue></ProductIdentifier>
    <DescriptiveDetail>
      <TitleDetail><TitleElement><TitleText>No Subject</TitleText></TitleElement></TitleDetail>
      <Language><LanguageCode>eng</LanguageCode></Language>
    </DescriptiveDetail>
    <PublishingDetail>
      <Imprint><ImprintName>Road House</ImprintName></Imprint>
      <PublishingDate><PublishingDateRole>01</PublishingDateRole><Date>20230301</Date></PublishingDate>
      <PublishingDate><PublishingDateRole>02</PublishingDateRole><Date>20230315</Date></PublishingDate>
    </PublishingDetail>
    <ProductSupply><SupplyDetail>
      <Price><CurrencyCode>USD</CurrencyCode><PriceAmount>12.00</PriceAmount></Price>
    </SupplyDetail></ProductSupply>
  </Product>
</ONIXMessage>"#;

fn context() -> ExtractionContext {
    let rows = vec![
        ClassificationRow {
            code: "FIC022000".to_string(),
            category_path: "FICTION / Mystery & Detective / General".to_string(),
            custom_category: Some("Mystery".to_string()),
        },
        ClassificationRow {
            code: "HIS027000".to_string(),
            category_path: "HISTORY / Military / General".to_string(),
            custom_category: None,
        },
    ];
    let rules = [
        ("World War", "Military"),
        ("Civil War", "Military"),
        ("cooking", "Food"),
    ]
    .into_iter()
    .map(|(phrase, tag)| SubjectPhraseRule {
        phrase: phrase.to_string(),
        tag: tag.to_string(),
    });
    ExtractionContext::new(ClassificationTable::new(rows), SubjectPhraseMatcher::new(rules))
}

fn records(xml: &str) -> Vec<RawProductRecord> {
    let document = SourceDocument {
        path: PathBuf::from("xml_metadata/Harbor/feed.xml"),
        file_name: "feed.xml".to_string(),
        publisher: "Harbor".to_string(),
    };
    enumerate_products(parse_document(xml).expect("parse"), &document).expect("products")
}

fn extract(record: &RawProductRecord) -> Result<onix_model::NormalizedBook, onix_model::ValidationFailure> {
    let adapter = VersionAdapter::for_release(&record.release).expect("supported release");
    adapter.extract(record, &context())
}

#[test]
fn maps_onix_21_product() {
    let records = records(ONIX_21);
    assert_eq!(records.len(), 1);
    let book = extract(&records[0]).expect("valid 2.1 product");

    insta::assert_json_snapshot!(book, @r#"
    {
      "isbn": "9780000000017",
      "title": "The Quiet Harbor",
      "subtitle": "A Novel",
      "contributors": "Jane Doe, John Roe",
      "imprint": "Harbor Books",
      "pubDate": "20240102",
      "onSaleDate": "20240109",
      "usPrice": "19.99",
      "caPrice": "19.99",
      "runtime": "001:23:4500",
      "BISAC": "FIC022000",
      "language": "eng",
      "primaryCategory": "FICTION",
      "secondaryCategories": "Mystery & Detective / General",
      "customCategory": "Mystery Military",
      "To Collect (x)": ""
    }
    "#);
}

#[test]
fn maps_onix_30_product() {
    let records = records(ONIX_30);
    let book = extract(&records[0]).expect("valid 3.0 product");

    assert_eq!(book.isbn, "9780000000024");
    assert_eq!(book.title, "The Long Road");
    assert_eq!(book.subtitle, None);
    assert_eq!(book.contributors, "Ann Lee");
    assert_eq!(book.imprint, "Road House");
    assert_eq!(book.pub_date, "20230301");
    assert_eq!(book.on_sale_date, "20230315");
    assert_eq!(book.us_price, "29.00");
    assert_eq!(book.ca_price.as_deref(), Some("29.00"));
    assert_eq!(book.runtime.as_deref(), Some("2:5"));
    assert_eq!(book.classification_code, "HIS027000");
    assert_eq!(book.primary_category.as_deref(), Some("HISTORY"));
    assert_eq!(book.secondary_categories.as_deref(), Some("Military / General"));
    // No SubjectHeadingText, so the Text blocks feed the matcher.
    assert_eq!(book.custom_category.as_deref(), Some("Military, Food"));
    assert!(!book.selected);
}

#[test]
fn missing_classification_code_fails_only_that_product() {
    let records = records(ONIX_30);
    assert_eq!(records.len(), 2);

    assert!(extract(&records[0]).is_ok());
    let failure = extract(&records[1]).expect_err("no main subject");
    assert_eq!(failure.isbn.as_deref(), Some("9780000000031"));
    assert_eq!(failure.fields(), vec!["BISAC"]);
}

#[test]
fn reports_every_missing_field() {
    let records = records(
        r#"<ONIXMessage release="2.1"><Product><TitleText></TitleText></Product></ONIXMessage>"#,
    );
    let failure = extract(&records[0]).expect_err("empty product");
    assert_eq!(failure.isbn, None);
    assert_eq!(
        failure.fields(),
        vec![
            "isbn",
            "title",
            "imprint",
            "pubDate",
            "onSaleDate",
            "usPrice",
            "BISAC",
            "language"
        ]
    );
}

proptest! {
    #[test]
    fn fixed_width_runtime_keeps_every_character(value in "[0-9]{3,12}") {
        let decoded = decode_runtime(Some("16"), Some(&value)).expect("decoded");
        prop_assert_eq!(decoded.replace(':', ""), value.clone());
        prop_assert_eq!(&decoded[..3], &value[..3]);
    }

    #[test]
    fn minute_runtime_round_trips_whole_minutes(total in 0u32..100_000) {
        let decoded = decode_runtime(Some("05"), Some(&total.to_string())).expect("decoded");
        let (hours, minutes) = decoded.split_once(':').expect("separator");
        let hours: u32 = hours.parse().expect("hours");
        let minutes: u32 = minutes.parse().expect("minutes");
        prop_assert!(minutes < 60);
        prop_assert_eq!(hours * 60 + minutes, total);
    }
}
