use tsp_macros::test_fn_on_all_instances;

fn parse_instance(path: &str) {
    let parsing_result = tsp_parser::parse_tsp_instance(path);
    assert!(parsing_result.is_ok());
}

#[rust_analyzer::skip]
test_fn_on_all_instances!(parse_instance, parses);
