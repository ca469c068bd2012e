mod tests_store_data;
