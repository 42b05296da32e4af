mod markdown_out_test;
mod text_snippet_test;
