mod tests_model;
mod tests_neo4j_error;
