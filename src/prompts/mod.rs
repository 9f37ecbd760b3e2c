pub mod template;

pub use template::StringPromptTemplate;
