use std::collections::BTreeMap;

use rowfmt::RowError;
use rowfmt::writer::RowWriterBuilder;
use serde::Serialize;

#[cfg(windows)]
const EOL: &str = "\r\n";
#[cfg(not(windows))]
const EOL: &str = "\n";

#[derive(Serialize)]
struct Event<'a> {
    kind: &'a str,
    count: u32,
}

#[tokio::test]
async fn async_writer_mirrors_the_sync_format() -> anyhow::Result<()> {
    let mut wtr = RowWriterBuilder::new().from_async_writer(Vec::new());

    wtr.write_header_from(&Event { kind: "", count: 0 }).await?;
    wtr.write_record(&Event {
        kind: "click",
        count: 3,
    })
    .await?;
    wtr.write_record(&Event {
        kind: "scroll,deep",
        count: 1,
    })
    .await?;

    let data = String::from_utf8(wtr.into_inner().await?)?;
    assert_eq!(
        data,
        format!("kind,count{EOL}click,3{EOL}\"scroll,deep\",1{EOL}")
    );

    Ok(())
}

#[tokio::test]
async fn async_writer_resolves_fields_like_the_sync_one() -> anyhow::Result<()> {
    let mut wtr = RowWriterBuilder::new().from_async_writer(Vec::new());

    wtr.write_header(["count", "kind"]).await?;
    wtr.write_record(&Event {
        kind: "click",
        count: 3,
    })
    .await?;
    wtr.write_record(&BTreeMap::from([("kind", "tap")])).await?;

    assert_eq!(
        wtr.fields(),
        Some(&["count".to_string(), "kind".to_string()][..])
    );

    let data = String::from_utf8(wtr.into_inner().await?)?;
    assert_eq!(data, format!("count,kind{EOL}3,click{EOL},tap{EOL}"));

    Ok(())
}

#[tokio::test]
async fn async_format_errors_leave_the_sink_untouched() -> anyhow::Result<()> {
    let mut wtr = RowWriterBuilder::new().from_async_writer(Vec::new());

    let result = wtr.write_record(&None::<u32>).await;
    assert!(matches!(
        result,
        Err(RowError::InvalidArgument { name: "record", .. })
    ));

    assert!(wtr.into_inner().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn async_writer_can_borrow_its_sink() -> anyhow::Result<()> {
    let mut buffer: Vec<u8> = Vec::new();
    {
        let mut wtr = RowWriterBuilder::new()
            .quote_all(true)
            .from_async_writer(&mut buffer);
        wtr.write_record(&(7, "")).await?;
        wtr.flush().await?;
    }

    assert_eq!(String::from_utf8(buffer)?, format!("\"7\",\"\"{EOL}"));

    Ok(())
}

#[test]
fn wait_drives_the_async_writer_from_sync_code() -> anyhow::Result<()> {
    let data = rowfmt::task::wait(async {
        let mut wtr = RowWriterBuilder::new().from_async_writer(Vec::new());
        wtr.write_header(["label"]).await?;
        wtr.write_record(&("one",)).await?;
        wtr.into_inner().await
    })?;

    assert_eq!(String::from_utf8(data)?, format!("label{EOL}one{EOL}"));

    Ok(())
}
