//! Server payloads decoded and re-encoded: every read-only field drops out,
//! structured references collapse to `*_id`, and the write-subset keeps its
//! wire order in both formats.

use redmine_codec::{Codec, Entity, Issue, Membership, Project, TimeEntry, User, Version};

fn reemit<T: Entity>(json_doc: &str, xml_doc: &str, expected_json: &str, expected_xml: &str) {
    let decoded: [T; 2] = [
        Codec::json().decode(json_doc.as_bytes()).unwrap(),
        Codec::xml().decode(xml_doc.as_bytes()).unwrap(),
    ];
    for (source, value) in ["json", "xml"].into_iter().zip(&decoded) {
        let json = String::from_utf8(Codec::json().encode(value).unwrap()).unwrap();
        assert_eq!(json, expected_json, "decoded from {source}");
        let xml = String::from_utf8(Codec::xml().encode(value).unwrap()).unwrap();
        assert_eq!(xml, expected_xml, "decoded from {source}");
    }
}

#[test]
fn issue_payload_reemits_its_write_subset() {
    reemit::<Issue>(
        r#"{"issue":{"id":12,"project":{"id":1,"name":"Alpha"},"tracker":{"id":2,"name":"Bug"},"status":{"id":3,"name":"Resolved"},"priority":{"id":4,"name":"High"},"author":{"id":5,"name":"Ann"},"assigned_to":{"id":6,"name":"Bob"},"parent":{"id":40},"subject":"Crash","description":"Boom","start_date":"2024-01-02","due_date":null,"done_ratio":30,"is_private":false,"estimated_hours":2.5,"spent_hours":1.0,"custom_fields":[{"id":1,"name":"Env","value":"prod"},{"id":2,"name":"Tags","multiple":true,"value":["a","b"]}],"created_on":"2024-01-02T10:00:00Z","updated_on":"2024-01-03T10:00:00Z","closed_on":null}}"#,
        concat!(
            r#"<issue><id>12</id><project id="1" name="Alpha"/><tracker id="2" name="Bug"/>"#,
            r#"<status id="3" name="Resolved"/><priority id="4" name="High"/><author id="5" name="Ann"/>"#,
            r#"<assigned_to id="6" name="Bob"/><parent id="40"/><subject>Crash</subject>"#,
            "<description>Boom</description><start_date>2024-01-02</start_date><due_date/>",
            "<done_ratio>30</done_ratio><is_private>false</is_private>",
            "<estimated_hours>2.5</estimated_hours><spent_hours>1.0</spent_hours>",
            r#"<custom_fields type="array"><custom_field id="1" name="Env"><value>prod</value></custom_field>"#,
            r#"<custom_field id="2" name="Tags" multiple="true"><value type="array"><value>a</value><value>b</value></value></custom_field></custom_fields>"#,
            "<created_on>2024-01-02T10:00:00Z</created_on><updated_on>2024-01-03T10:00:00Z</updated_on>",
            "<closed_on/></issue>"
        ),
        r#"{"issue":{"subject":"Crash","description":"Boom","is_private":false,"project_id":1,"tracker_id":2,"status_id":3,"priority_id":4,"assigned_to_id":6,"parent_issue_id":40,"start_date":"2024-01-02","estimated_hours":2.5,"done_ratio":30,"custom_fields":[{"id":1,"value":"prod"},{"id":2,"multiple":true,"value":["a","b"]}]}}"#,
        concat!(
            "<issue><subject>Crash</subject><description>Boom</description><is_private>false</is_private>",
            "<project_id>1</project_id><tracker_id>2</tracker_id><status_id>3</status_id>",
            "<priority_id>4</priority_id><assigned_to_id>6</assigned_to_id><parent_issue_id>40</parent_issue_id>",
            "<start_date>2024-01-02</start_date><estimated_hours>2.5</estimated_hours><done_ratio>30</done_ratio>",
            r#"<custom_fields type="array"><custom_field id="1"><value>prod</value></custom_field>"#,
            r#"<custom_field id="2" multiple="true"><value type="array"><value>a</value><value>b</value></value></custom_field>"#,
            "</custom_fields></issue>"
        ),
    );
}

#[test]
fn project_payload_reemits_ids_and_module_names() {
    reemit::<Project>(
        r#"{"project":{"id":1,"name":"Alpha","identifier":"alpha","description":"Main","homepage":"","parent":{"id":9,"name":"Root"},"status":1,"is_public":true,"inherit_members":false,"trackers":[{"id":1,"name":"Bug"},{"id":2,"name":"Feature"}],"enabled_modules":[{"id":10,"name":"issue_tracking"},{"id":11,"name":"wiki"}],"custom_fields":[{"id":3,"name":"Owner","value":"ops"}],"created_on":"2024-01-01T00:00:00Z","updated_on":"2024-01-01T00:00:00Z"}}"#,
        concat!(
            "<project><id>1</id><name>Alpha</name><identifier>alpha</identifier>",
            r#"<description>Main</description><homepage></homepage><parent id="9" name="Root"/>"#,
            "<status>1</status><is_public>true</is_public><inherit_members>false</inherit_members>",
            r#"<trackers type="array"><tracker id="1" name="Bug"/><tracker id="2" name="Feature"/></trackers>"#,
            r#"<enabled_modules type="array"><enabled_module id="10" name="issue_tracking"/><enabled_module id="11" name="wiki"/></enabled_modules>"#,
            r#"<custom_fields type="array"><custom_field id="3" name="Owner"><value>ops</value></custom_field></custom_fields>"#,
            "<created_on>2024-01-01T00:00:00Z</created_on><updated_on>2024-01-01T00:00:00Z</updated_on></project>"
        ),
        r#"{"project":{"name":"Alpha","identifier":"alpha","description":"Main","homepage":"","is_public":true,"inherit_members":false,"parent_id":9,"tracker_ids":[1,2],"enabled_module_names":["issue_tracking","wiki"],"custom_fields":[{"id":3,"value":"ops"}]}}"#,
        concat!(
            "<project><name>Alpha</name><identifier>alpha</identifier><description>Main</description>",
            "<homepage></homepage><is_public>true</is_public><inherit_members>false</inherit_members>",
            "<parent_id>9</parent_id>",
            r#"<tracker_ids type="array"><tracker_id>1</tracker_id><tracker_id>2</tracker_id></tracker_ids>"#,
            r#"<enabled_module_names type="array"><enabled_module_name>issue_tracking</enabled_module_name><enabled_module_name>wiki</enabled_module_name></enabled_module_names>"#,
            r#"<custom_fields type="array"><custom_field id="3"><value>ops</value></custom_field></custom_fields>"#,
            "</project>"
        ),
    );
}

#[test]
fn time_entry_payload_reemits_bare_ids() {
    reemit::<TimeEntry>(
        r#"{"time_entry":{"id":7,"project":{"id":1,"name":"Alpha"},"issue":{"id":12},"user":{"id":5,"name":"Ann"},"activity":{"id":9,"name":"Design"},"hours":1.50,"comments":"Review","spent_on":"2024-03-04","created_on":"2024-03-04T09:00:00Z","updated_on":"2024-03-04T09:00:00Z","custom_fields":[]}}"#,
        concat!(
            r#"<time_entry><id>7</id><project id="1" name="Alpha"/><issue id="12"/>"#,
            r#"<user id="5" name="Ann"/><activity id="9" name="Design"/><hours>1.50</hours>"#,
            "<comments>Review</comments><spent_on>2024-03-04</spent_on>",
            "<created_on>2024-03-04T09:00:00Z</created_on><updated_on>2024-03-04T09:00:00Z</updated_on>",
            r#"<custom_fields type="array"></custom_fields></time_entry>"#
        ),
        r#"{"time_entry":{"issue_id":12,"project_id":1,"spent_on":"2024-03-04","hours":1.5,"activity_id":9,"comments":"Review","user_id":5,"custom_fields":[]}}"#,
        concat!(
            "<time_entry><issue_id>12</issue_id><project_id>1</project_id><spent_on>2024-03-04</spent_on>",
            "<hours>1.5</hours><activity_id>9</activity_id><comments>Review</comments><user_id>5</user_id>",
            r#"<custom_fields type="array"></custom_fields></time_entry>"#
        ),
    );
}

#[test]
fn user_payload_drops_server_fields() {
    reemit::<User>(
        r#"{"user":{"id":5,"login":"ann","admin":false,"firstname":"Ann","lastname":"Lee","mail":"ann@example.net","created_on":"2024-01-01T00:00:00Z","last_login_on":null,"api_key":"abc","status":1,"custom_fields":[{"id":4,"name":"Phone","value":"555"}],"memberships":[{"id":3,"project":{"id":1,"name":"Alpha"},"roles":[{"id":4,"name":"Dev"}]}],"groups":[{"id":12,"name":"Devs"}]}}"#,
        concat!(
            "<user><id>5</id><login>ann</login><admin>false</admin><firstname>Ann</firstname>",
            "<lastname>Lee</lastname><mail>ann@example.net</mail><created_on>2024-01-01T00:00:00Z</created_on>",
            "<last_login_on/><api_key>abc</api_key><status>1</status>",
            r#"<custom_fields type="array"><custom_field id="4" name="Phone"><value>555</value></custom_field></custom_fields>"#,
            r#"<memberships type="array"><membership><id>3</id><project id="1" name="Alpha"/>"#,
            r#"<roles type="array"><role id="4" name="Dev"/></roles></membership></memberships>"#,
            r#"<groups type="array"><group id="12" name="Devs"/></groups></user>"#
        ),
        r#"{"user":{"login":"ann","firstname":"Ann","lastname":"Lee","mail":"ann@example.net","admin":false,"status":"active","custom_fields":[{"id":4,"value":"555"}]}}"#,
        concat!(
            "<user><login>ann</login><firstname>Ann</firstname><lastname>Lee</lastname>",
            "<mail>ann@example.net</mail><admin>false</admin><status>active</status>",
            r#"<custom_fields type="array"><custom_field id="4"><value>555</value></custom_field></custom_fields>"#,
            "</user>"
        ),
    );
}

#[test]
fn version_payload_reemits_due_date() {
    reemit::<Version>(
        r#"{"version":{"id":3,"project":{"id":1,"name":"Alpha"},"name":"1.0","description":"First","status":"open","due_date":"2024-06-30","sharing":"none","wiki_page_title":"","estimated_hours":10.0,"spent_hours":2.5,"created_on":"2024-01-01T00:00:00Z","updated_on":"2024-01-01T00:00:00Z"}}"#,
        concat!(
            r#"<version><id>3</id><project id="1" name="Alpha"/><name>1.0</name>"#,
            "<description>First</description><status>open</status><effective_date>2024-06-30</effective_date>",
            "<sharing>none</sharing><wiki_page_title></wiki_page_title>",
            "<estimated_hours>10.0</estimated_hours><spent_hours>2.5</spent_hours>",
            "<created_on>2024-01-01T00:00:00Z</created_on><updated_on>2024-01-01T00:00:00Z</updated_on></version>"
        ),
        r#"{"version":{"name":"1.0","status":"open","sharing":"none","due_date":"2024-06-30","description":"First","wiki_page_title":""}}"#,
        concat!(
            "<version><name>1.0</name><status>open</status><sharing>none</sharing>",
            "<due_date>2024-06-30</due_date><description>First</description>",
            "<wiki_page_title></wiki_page_title></version>"
        ),
    );
}

#[test]
fn membership_payloads_reemit_user_and_role_ids() {
    reemit::<Membership>(
        r#"{"membership":{"id":3,"project":{"id":1,"name":"Alpha"},"user":{"id":5,"name":"Ann"},"roles":[{"id":4,"name":"Dev"},{"id":5,"name":"Reporter","inherited":true}]}}"#,
        concat!(
            r#"<membership><id>3</id><project id="1" name="Alpha"/><user id="5" name="Ann"/>"#,
            r#"<roles type="array"><role id="4" name="Dev"/><role id="5" name="Reporter" inherited="true"/></roles>"#,
            "</membership>"
        ),
        r#"{"membership":{"user_id":5,"role_ids":[4,5]}}"#,
        r#"<membership><user_id>5</user_id><role_ids type="array"><role_id>4</role_id><role_id>5</role_id></role_ids></membership>"#,
    );
    reemit::<Membership>(
        r#"{"membership":{"id":4,"project":{"id":1,"name":"Alpha"},"group":{"id":12,"name":"Devs"},"roles":[{"id":4,"name":"Dev"}]}}"#,
        r#"<membership><id>4</id><project id="1" name="Alpha"/><group id="12" name="Devs"/><roles type="array"><role id="4" name="Dev"/></roles></membership>"#,
        r#"{"membership":{"role_ids":[4]}}"#,
        r#"<membership><role_ids type="array"><role_id>4</role_id></role_ids></membership>"#,
    );
}
