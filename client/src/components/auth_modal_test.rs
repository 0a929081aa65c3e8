use super::*;

#[test]
fn email_step_only_asks_for_email() {
    assert_eq!(step_fields(AuthStep::EmailEntry), &[Field::Email]);
}

#[test]
fn signin_step_only_asks_for_password() {
    assert_eq!(step_fields(AuthStep::Signin), &[Field::Password]);
}

#[test]
fn signup_step_ends_with_password_confirmation() {
    let fields = step_fields(AuthStep::Signup);
    assert_eq!(fields.len(), 5);
    assert_eq!(fields.last(), Some(&Field::ConfirmPassword));
    assert!(!fields.contains(&Field::Email));
}

#[test]
fn slot_writes_are_visible_through_value() {
    let mut form = AuthForm::default();
    for (i, field) in step_fields(AuthStep::Signup).iter().enumerate() {
        *field.slot(&mut form) = format!("v{i}");
    }
    assert_eq!(form.username, "v0");
    assert_eq!(form.full_name, "v1");
    assert_eq!(form.dob, "v2");
    assert_eq!(Field::Password.value(&form), "v3");
    assert_eq!(Field::ConfirmPassword.value(&form), "v4");
    assert_eq!(Field::Email.value(&form), "");
}

#[test]
fn password_fields_are_masked() {
    assert_eq!(Field::Password.input_type(), "password");
    assert_eq!(Field::ConfirmPassword.input_type(), "password");
    assert_eq!(Field::Dob.input_type(), "date");
    assert_eq!(Field::Email.autocomplete(), "email");
}
