//! Basic CRUD walkthrough against the in-process document store
//!
//! Sequences the classic sample flow: reset the table, print its
//! metadata, insert documents (directly, with a minted id, and through a
//! bean mapping), query with projections and predicate trees, apply
//! mutations, and close the handle.

use chrono::NaiveDate;
use docstore::{
    extract, CompareOp, Condition, Document, DocumentStore, Error, FieldMap, Mutation, Result,
    Table, Value,
};

const TABLE_PATH: &str = "/apps/user_profiles";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let store = DocumentStore::new();
    store.delete(TABLE_PATH);
    let table = store.create(TABLE_PATH);
    print_table_information(&table);

    println!("\n\n========== INSERT NEW RECORDS ==========");
    create_documents(&table)?;

    println!("\n\n========== QUERIES ==========");
    query_documents(&table)?;

    println!("\n\n========== UPDATE ==========");
    update_documents(&table)?;

    table.close();
    Ok(())
}

/// A user profile record, mapped to documents by [`user_field_map`]
#[derive(Debug, Default, Clone, PartialEq)]
struct User {
    id: String,
    first_name: String,
    last_name: String,
    dob: Option<NaiveDate>,
    interests: Vec<String>,
}

/// The statically declared document mapping for [`User`]
fn user_field_map() -> FieldMap<User> {
    FieldMap::<User>::new()
        .field(
            "_id",
            |u| Some(Value::from(u.id.as_str())),
            |u, v| Ok(u.id = extract::string(v)?),
        )
        .field(
            "first_name",
            |u| Some(Value::from(u.first_name.as_str())),
            |u, v| Ok(u.first_name = extract::string(v)?),
        )
        .field(
            "last_name",
            |u| Some(Value::from(u.last_name.as_str())),
            |u, v| Ok(u.last_name = extract::string(v)?),
        )
        .field(
            "dob",
            |u| u.dob.map(Value::from),
            |u, v| Ok(u.dob = Some(extract::date(v)?)),
        )
        .field(
            "interests",
            |u| Some(Value::from(u.interests.clone())),
            |u, v| Ok(u.interests = extract::string_array(v)?),
        )
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}

fn print_table_information(table: &Table) {
    println!("\n=============== TABLE INFO ===============");
    println!(" Table Name : {}", table.name());
    println!(" Table Path : {}", table.path());
    for tablet in table.tablet_infos() {
        println!(" Table Infos : {}", tablet);
    }
    println!("==========================================\n");
}

fn create_documents(table: &Table) -> Result<()> {
    // Create a new document (simple format)
    let document = Document::new()
        .set("_id", "jdoe")?
        .set("first_name", "John")?
        .set("last_name", "Doe")?
        .set("dob", date("1970-06-23"))?;
    table.insert_or_replace(document)?;

    // Create a new document without _id and store it under an explicit one
    let document = Document::new()
        .set("first_name", "David")?
        .set("last_name", "Simon")?
        .set("dob", date("1980-10-13"))?;
    table.insert_with_id("dsimon", document)?;

    // Create a new document from a record through the field mapping
    let user = User {
        id: "alehmann".to_string(),
        first_name: "Andrew".to_string(),
        last_name: "Lehmann".to_string(),
        dob: Some(date("1980-10-13")),
        interests: vec!["html".to_string(), "css".to_string(), "js".to_string()],
    };
    let document = user_field_map().to_document(&user)?;
    table.insert_or_replace(document)?;

    // Inserting under an already-taken identifier is a recoverable conflict
    match table.insert_with_id("dsimon", Document::new().set("first_name", "Andrew")?) {
        Err(Error::DocumentExists(id)) => {
            println!("Exception during insert : document already exists: {}", id)
        }
        other => other?,
    }

    // A more complex record, built with dotted paths
    let document = Document::new()
        .set("_id", "mdupont")?
        .set("first_name", "Maxime")?
        .set("last_name", "Dupont")?
        .set("dob", date("1982-02-03"))?
        .set("interests", vec!["sports", "movies", "electronics"])?
        .set("address.line", "1223 Broadway")?
        .set("address.city", "San Jose")?
        .set("address.zip", 95109)?;
    table.insert(document)?;

    // Another way to build a subdocument: set a nested document value
    let address = Document::new()
        .set("line", "100 Main Street")?
        .set("city", "San Francisco")?
        .set("zip", 94105)?;
    let document = Document::new()
        .set("_id", "rsmith")?
        .set("first_name", "Robert")?
        .set("last_name", "Smith")?
        .set("dob", date("1982-02-03"))?
        .set("interests", vec!["electronics", "music", "sports"])?
        .set("address", address.into_value())?;
    table.insert(document)?;

    table.flush();
    Ok(())
}

fn query_documents(table: &Table) -> Result<()> {
    {
        // Get a single document
        let record = table
            .find_by_id("mdupont")
            .ok_or_else(|| Error::DocumentNotFound("mdupont".to_string()))?;
        println!("Single record\n\t{}", record);
        println!(
            "Id : {} - first name : {}",
            record.id().unwrap_or_default(),
            record.get_string("first_name")?.unwrap_or_default()
        );
    }

    {
        // Get a single document with projection
        let record = table
            .find_by_id_projected("mdupont", &["last_name"])?
            .ok_or_else(|| Error::DocumentNotFound("mdupont".to_string()))?;
        println!("Single record with projection\n\t{}", record);
    }

    {
        // Get a single document and map it to the record type
        let doc = table
            .find_by_id("alehmann")
            .ok_or_else(|| Error::DocumentNotFound("alehmann".to_string()))?;
        let user = user_field_map().from_document(&doc)?;
        println!("User record from document : {:?}", user);
    }

    {
        // All documents in the table
        println!("\n\nAll records");
        for doc in table.find().iter() {
            println!("\t{}", doc?);
        }
    }

    {
        // All documents with projection
        println!("\n\nAll records with projection");
        for doc in table.find_projected(&["first_name", "last_name"]).iter() {
            println!("\t{}", doc?);
        }
    }

    {
        // All documents mapped to records; unknown fields are ignored
        println!("\n\nAll records as typed records");
        let map = user_field_map();
        for doc in table.find().iter() {
            println!("\t{:?}", map.from_document(&doc?)?);
        }
    }

    {
        // Condition: equality on a string field
        let condition = Condition::is("last_name", CompareOp::Equal, "Doe");
        println!("\n\nCondition: {}", condition);
        for doc in table.find_where(condition).iter() {
            println!("\t{}", doc?);
        }
    }

    {
        // Condition: date range
        let condition = Condition::and([
            Condition::is("dob", CompareOp::GreaterOrEqual, date("1980-01-01")),
            Condition::is("dob", CompareOp::Less, date("1981-01-01")),
        ]);
        println!("\n\nCondition: {}", condition);
        for doc in table.find_where(condition).iter() {
            println!("\t{}", doc?);
        }
    }

    {
        // Condition: field in a subdocument
        let condition = Condition::is("address.zip", CompareOp::Equal, 95109);
        println!("\n\nCondition: {}", condition);
        for doc in table.find_where(condition).iter() {
            println!("\t{}", doc?);
        }
    }

    {
        // Condition: array contains a value at any position
        let condition = Condition::is("interests[]", CompareOp::Equal, "sports");
        println!("\n\nCondition: {}", condition);
        for doc in table.find_where(condition).iter() {
            println!("\t{}", doc?);
        }
    }

    {
        // Condition: array contains a value at a specific position
        let condition = Condition::is("interests[0]", CompareOp::Equal, "sports");
        println!("\n\nCondition: {}", condition);
        let stream =
            table.find_where_projected(condition, &["first_name", "last_name", "interests"]);
        for doc in stream.iter() {
            println!("\t{}", doc?);
        }
    }

    Ok(())
}

fn update_documents(table: &Table) -> Result<()> {
    {
        println!("\t\tAdd address and status to jdoe");
        println!("before :\t{}", table.find_by_id("jdoe").unwrap_or_default());

        let mutation = Mutation::new()
            .set("active", true)
            .set("address.line", "1015 15th Avenue")
            .set("address.city", "Redwood City")
            .set("address.zip", 94065);
        table.update("jdoe", &mutation)?;
        table.flush();

        println!("after :\t\t{}", table.find_by_id("jdoe").unwrap_or_default());
    }

    {
        println!("\n\n\t\tAppend new interests to users");

        let mutation = Mutation::new().append("interests", vec!["development"]);
        table.update("jdoe", &mutation)?;
        table.update("mdupont", &mutation)?;
        table.flush();

        for id in ["jdoe", "mdupont"] {
            let doc = table
                .find_by_id_projected(id, &["first_name", "last_name", "interests"])?
                .unwrap_or_default();
            println!("after :\t\t{}", doc);
        }
    }

    {
        println!("\n\n\t\tRemove attributes (dob)");
        println!("before :\t{}", table.find_by_id("jdoe").unwrap_or_default());

        let mutation = Mutation::new().delete("dob");
        table.update("jdoe", &mutation)?;
        table.flush();

        println!("after :\t\t{}", table.find_by_id("jdoe").unwrap_or_default());
    }

    Ok(())
}
