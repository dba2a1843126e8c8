//! Macros for describing records with minimal boilerplate.

/// Builds a [`Record`](crate::Record) from `name : tag => value` rows.
///
/// Equivalent to chaining [`Record::field`](crate::Record::field) calls;
/// declaration order is walk order.
///
/// # Examples
///
/// ```rust,ignore
/// use tagcheck::{record, Describe, Record};
///
/// struct LoginRequest {
///     username: String,
///     password: String,
/// }
///
/// impl Describe for LoginRequest {
///     fn describe(&self) -> Record {
///         record!("LoginRequest" {
///             "Username": "required,email" => &self.username,
///             "Password": "required,min=5" => &self.password,
///         })
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    ($key:literal { $( $name:literal : $tag:literal => $value:expr ),+ $(,)? }) => {
        $crate::Record::new($key)
            $( .field($name, $tag, $value) )+
    };
}

#[cfg(test)]
mod tests {
    use crate::value::Value;

    #[test]
    fn expands_to_builder_chain() {
        let record = record!("LoginRequest" {
            "Username": "required,email" => "santoso@gmail.com",
            "Password": "required,min=5" => "rahasia",
        });
        assert_eq!(record.type_key(), "LoginRequest");
        assert_eq!(record.fields().len(), 2);
        assert_eq!(
            record.get("Password"),
            Some(&Value::Str("rahasia".into()))
        );
        assert_eq!(record.fields()[0].tag(), "required,email");
    }
}
