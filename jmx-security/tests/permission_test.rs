//! Permission integration tests

use jmx_core::ObjectName;
use jmx_security::{Action, ActionMask, MBeanPermission, PermissionError};

#[test]
fn test_unregister_and_get_class_loader() {
    let mask = ActionMask::parse("unregisterMBean,getClassLoader").unwrap();

    assert_eq!(mask.bits(), Action::UnregisterMBean.bit() | Action::GetClassLoader.bit());
    assert_eq!(mask.iter().collect::<Vec<_>>(), vec![Action::GetClassLoader, Action::UnregisterMBean]);
    assert!(!mask.contains(Action::RegisterMBean.into()));
}

#[test]
fn test_every_pair_of_actions_parses() {
    for first in Action::ALL {
        for second in Action::ALL {
            let text = format!("{} , {}", first, second);
            let mask = ActionMask::parse(&text).unwrap();
            assert_eq!(mask, first | second, "{}", text);
        }
    }
}

#[test]
fn test_rendered_actions_parse_back() {
    let mask = ActionMask::parse("*").unwrap();
    let rendered = mask.to_string();
    assert_eq!(ActionMask::parse(&rendered).unwrap(), ActionMask::ALL);
}

#[test]
fn test_query_mbeans_grant_covers_query_names_request() {
    let name = ObjectName::parse("java.lang:type=Memory").unwrap();
    let granted = MBeanPermission::from_parts(None, None, Some(&name), "queryMBeans").unwrap();
    let required = MBeanPermission::from_parts(None, None, Some(&name), "queryNames").unwrap();

    assert!(granted.implies(&required));
    assert!(!required.implies(&granted));
}

#[test]
fn test_policy_style_checks() {
    let policy = [
        MBeanPermission::new("com.example.*#*[com.example:*]", "getAttribute,setAttribute").unwrap(),
        MBeanPermission::new("*#*[*:*]", "queryNames,getDomains").unwrap(),
    ];
    let allowed = |request: &MBeanPermission| policy.iter().any(|p| p.implies(request));

    let read = MBeanPermission::new(
        "com.example.Pool#Size[com.example:type=Pool,name=db]",
        "getAttribute",
    )
    .unwrap();
    let invoke = MBeanPermission::new(
        "com.example.Pool#reset[com.example:type=Pool,name=db]",
        "invoke",
    )
    .unwrap();
    let list = MBeanPermission::new("-#-[other:type=X]", "queryNames").unwrap();

    assert!(allowed(&read));
    assert!(!allowed(&invoke));
    assert!(allowed(&list));
}

#[test]
fn test_bad_object_name_reports_cause() {
    let err = MBeanPermission::new("x#y[d:a=1,a=2]", "invoke").unwrap_err();
    match err {
        PermissionError::InvalidObjectName(cause) => {
            assert!(cause.to_string().contains("already defined"));
        }
        other => panic!("Expected InvalidObjectName, got {:?}", other),
    }
}
